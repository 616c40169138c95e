use smallvec::SmallVec;

/// A single attribute of an [`Element`].
///
/// The value is kept exactly as it was written in the source, including any
/// surrounding quotes. An empty value means the attribute was written bare
/// (e.g. `disabled`), and no `=` is emitted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A node of the intermediate document tree.
///
/// Elements are produced by the parser, rewritten by the transform
/// (imports are spliced in, component definitions are lifted out,
/// head-bound tags migrate into `<head>`) and finally serialized by the
/// generator. The tree is fully owned: component expansion deep-copies the
/// template instead of sharing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name; never empty for a node that stays in the tree.
    /// Mutated during the transform (e.g. a component definition
    /// becomes a `div`).
    pub tag_name: String,

    /// Path of the file this node was parsed from. Relative imports and
    /// links originating from this node resolve against it.
    pub source_file: String,

    /// Ordered attribute list. Insertion order is preserved because it
    /// decides the generated attribute order.
    pub attributes: Vec<Attribute>,

    /// Ordered class list; order decides the generated `class="..."` value.
    pub classes: SmallVec<[String; 4]>,

    pub id: Option<String>,

    /// Raw text payload, captured verbatim before any Markdown or
    /// variable processing.
    pub inner_text: Option<String>,

    pub children: Vec<Element>,

    /// The node never needs a closing tag unless it acquires text or
    /// children.
    pub is_void: bool,

    /// The inner text bypasses Markdown conversion (style/css/script).
    pub raw_text: bool,

    /// The text was captured with the multiline block (`.`) syntax.
    pub multiline: bool,
}

impl Element {
    pub fn new(tag_name: impl Into<String>, source_file: impl Into<String>) -> Element {
        Element {
            tag_name: tag_name.into(),
            source_file: source_file.into(),
            attributes: Vec::new(),
            classes: SmallVec::new(),
            id: None,
            inner_text: None,
            children: Vec::new(),
            is_void: false,
            raw_text: false,
            multiline: false,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Overrides the attribute in place when it exists, otherwise appends
    /// it, keeping the stored attribute order stable.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Removes the attribute and returns its value, if it was present.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(idx).value)
    }

    /// Whether the node carries a non-empty text payload.
    pub fn has_text(&self) -> bool {
        self.inner_text.as_deref().is_some_and(|t| !t.is_empty())
    }
}
