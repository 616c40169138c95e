#[macro_use]
extern crate lazy_static;

mod elements;
mod markdown;
mod variables;

use fxhash::FxHashMap;
use spell_core::Element;

pub use markdown::{DefaultMarkdown, MarkdownConverter};

/// The flattened variable scope visible at one point of the tree: every
/// ancestor attribute, merged root-to-node with closer ancestors winning.
pub type VariableScope = FxHashMap<String, String>;

/// How long substituted text can get before the converted output is set off
/// with a newline and a tab for readability. Cosmetic, not load-bearing.
pub const LONG_TEXT_THRESHOLD: usize = 70;

/// Serializes a final element tree to HTML.
pub struct CodegenContext<'a> {
    pub markdown: &'a dyn MarkdownConverter,
    pub long_text_threshold: usize,
}

impl Default for CodegenContext<'static> {
    fn default() -> Self {
        static MD: DefaultMarkdown = DefaultMarkdown;
        CodegenContext {
            markdown: &MD,
            long_text_threshold: LONG_TEXT_THRESHOLD,
        }
    }
}

impl CodegenContext<'_> {
    /// Generates the HTML for a whole document, starting from an empty
    /// variable scope.
    pub fn generate(&self, elements: &[Element]) -> String {
        self.generate_scoped(elements, &VariableScope::default())
    }
}
