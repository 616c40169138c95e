mod error;
mod options;
mod special_tags;
mod structs;

pub mod path;

pub use error::{Severity, SeverityLevel};
pub use options::CompileOptions;
pub use special_tags::{is_link_attribute, HEAD_TAGS, IMPORT_TAGS, RAW_TEXT_TAGS, VOID_TAGS};
pub use structs::{Attribute, Element};
