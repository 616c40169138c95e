use spell_core::{Severity, SeverityLevel};

#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based line of the failing offset.
    pub line: usize,
    /// 1-based column of the failing offset.
    pub col: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `(`, `[` or `{` in a tag's modifier section was never closed
    /// before the end of the input.
    UnmatchedNesting,
}

impl ParseError {
    /// Builds an error pointing at `idx`, with the line and column computed
    /// by counting newlines up to that offset.
    pub(crate) fn at(kind: ParseErrorKind, source: &str, idx: usize) -> ParseError {
        let idx = idx.min(source.len());
        let before = &source[..idx];
        let line = before.matches('\n').count() + 1;
        let col = idx - before.rfind('\n').map(|p| p + 1).unwrap_or(0) + 1;
        ParseError { kind, line, col }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ParseErrorKind::UnmatchedNesting => {
                write!(f, "{}:{}: unmatched bracket in tag modifiers", self.line, self.col)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl Severity for ParseError {
    fn severity(&self) -> SeverityLevel {
        SeverityLevel::UnrecoverableError
    }
}
