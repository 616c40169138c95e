//! The main public crate of the `spellc` project.
//!
//! Compiles Spell markup (`.spl`) to a complete HTML document:
//!
//! ```
//! use spell_core::CompileOptions;
//! use spell_transform::{NoImports, PassthroughScripts};
//!
//! let source = "h1 Hello, World!\n";
//! let options = CompileOptions::new("index.spl");
//!
//! let output = spellc::compile(source, &options, &NoImports, &PassthroughScripts).unwrap();
//! assert!(output.html.starts_with("<!DOCTYPE html>"));
//! assert!(output.html.contains("<h1>Hello, World!</h1>"));
//! ```

#[macro_use]
extern crate lazy_static;

pub mod errors;
mod reader;

use spell_codegen::CodegenContext;
pub use spell_core::{CompileOptions, Element, Severity, SeverityLevel};
use spell_script::SwcScriptCompiler;
pub use spell_transform::{NoImports, PassthroughScripts, ScriptCompiler, SourceReader};

pub use errors::CompileError;
pub use reader::FsReader;

/// One compiled document: the HTML text and every external script source
/// discovered in it, for the surrounding build to compile separately.
#[derive(Debug, Default)]
pub struct CompileOutput {
    pub html: String,
    pub script_sources: Vec<String>,
}

/// Compiles one Spell source to HTML: parse, transform, generate.
pub fn compile(
    source: &str,
    options: &CompileOptions,
    reader: &dyn SourceReader,
    scripts: &dyn ScriptCompiler,
) -> Result<CompileOutput, CompileError> {
    let elements = spell_parser::parse(source, options)?;
    let transformed = spell_transform::modify(elements, options, reader, scripts)?;
    let html = CodegenContext::default().generate(&transformed.elements);

    Ok(CompileOutput {
        html,
        script_sources: transformed.script_sources,
    })
}

/// Like [`compile`], but applies the two-tier error policy a batch build
/// wants: unrecoverable errors propagate and stop the build, anything
/// recoverable is logged together with the offending source and yields an
/// empty document so the remaining files still compile.
pub fn compile_or_empty(
    source: &str,
    options: &CompileOptions,
    reader: &dyn SourceReader,
    scripts: &dyn ScriptCompiler,
) -> Result<CompileOutput, CompileError> {
    match compile(source, options, reader, scripts) {
        Ok(output) => Ok(output),
        Err(err) if err.is_unrecoverable_error() => Err(err),
        Err(err) => {
            tracing::error!(
                file = %options.file_path,
                "{err}; offending source:\n{source}"
            );
            Ok(CompileOutput::default())
        }
    }
}

lazy_static! {
    /// The process-wide script compiler, warmed up on first use.
    static ref SHARED_SCRIPTS: SwcScriptCompiler = SwcScriptCompiler::new();
}

/// [`compile`] with the default collaborators: imports read from the local
/// filesystem and inline scripts compiled by the shared SWC service.
pub fn compile_with_defaults(
    source: &str,
    options: &CompileOptions,
) -> Result<CompileOutput, CompileError> {
    compile(source, options, &FsReader, &*SHARED_SCRIPTS)
}
