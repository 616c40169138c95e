//! Error definitions for the glue code of `spellc`

use spell_core::{Severity, SeverityLevel};
use spell_parser::ParseError;
use spell_transform::TransformError;

#[derive(Debug)]
pub enum CompileError {
    /// An error occurred while parsing a `.spl` source.
    ///
    /// Today this means an unmatched bracket inside tag modifiers; the
    /// parser treats everything else as text.
    Parse(ParseError),

    /// An error during the tree transform: a broken import, a missing
    /// import path, or a rejected inline script.
    Transform(TransformError),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "{e}"),
            CompileError::Transform(e) => write!(f, "{e}"),
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<TransformError> for CompileError {
    fn from(value: TransformError) -> Self {
        Self::Transform(value)
    }
}

impl Severity for CompileError {
    fn severity(&self) -> SeverityLevel {
        match self {
            CompileError::Parse(e) => e.severity(),
            CompileError::Transform(e) => e.severity(),
        }
    }
}
