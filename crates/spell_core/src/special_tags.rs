use phf::{phf_set, Set};

/// Tags whose inner text is emitted verbatim, without Markdown conversion.
pub static RAW_TEXT_TAGS: Set<&'static str> = phf_set! {
    "style",
    "css",
    "script",
};

/// Tags that are moved into the `head` tag wherever they are authored.
pub static HEAD_TAGS: Set<&'static str> = phf_set! {
    "title",
    "css",
    "style",
    "meta",
    "link",
};

/// Tags that don't need closing tags by default.
/// Adding text or children to any of these still forces a closing tag.
pub static VOID_TAGS: Set<&'static str> = phf_set! {
    "meta",
    "wbr",
    "br",
};

/// The accepted synonyms for importing another `.spl` file.
pub static IMPORT_TAGS: Set<&'static str> = phf_set! {
    "@import",
    "@imports",
    "@require",
    "@requires",
    "@include",
    "@includes",
    "@need",
    "@needs",
    "@want",
    "@wants",
    "@desire",
    "@desires",
    "@necessitate",
    "@necessitates",
    "@steal-code-from",
    "@steals-code-from",
};

/// Whether an attribute is expected to contain a URL, in which case its
/// value is rewritten to a relative link when content is inlined from
/// another file.
pub fn is_link_attribute(name: &str) -> bool {
    name == "src" || name == "href" || name.starts_with("data-")
}
