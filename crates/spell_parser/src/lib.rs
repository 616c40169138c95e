mod core;
mod error;
mod modifiers;

pub use crate::core::parse;
pub use error::{ParseError, ParseErrorKind};
