use spell_core::{Severity, SeverityLevel};
use swc_core::common::{Span, Spanned, DUMMY_SP};

#[derive(Debug)]
pub struct ScriptError {
    pub kind: ScriptErrorKind,
    pub span: Span,
}

#[derive(Debug)]
pub enum ScriptErrorKind {
    /// Error while parsing the TypeScript source
    BadSyntax(swc_ecma_parser::error::SyntaxError),
    /// Error reported by the type-stripping passes
    Transform(String),
    /// Error while emitting JavaScript
    Emit(String),
}

impl ScriptError {
    pub fn transform(message: String) -> ScriptError {
        ScriptError {
            kind: ScriptErrorKind::Transform(message),
            span: DUMMY_SP,
        }
    }

    pub fn emit(message: String) -> ScriptError {
        ScriptError {
            kind: ScriptErrorKind::Emit(message),
            span: DUMMY_SP,
        }
    }
}

impl From<swc_ecma_parser::error::Error> for ScriptError {
    fn from(value: swc_ecma_parser::error::Error) -> ScriptError {
        let span = value.span();

        ScriptError {
            kind: ScriptErrorKind::BadSyntax(value.into_kind()),
            span,
        }
    }
}

impl std::fmt::Display for ScriptErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptErrorKind::BadSyntax(e) => write!(f, "{:?}", e),
            ScriptErrorKind::Transform(msg) => write!(f, "{msg}"),
            ScriptErrorKind::Emit(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "script compilation failed: {}", self.kind)
    }
}

// A broken script costs the output of the file it sits in, but a
// surrounding batch build keeps going.
impl Severity for ScriptError {
    fn severity(&self) -> SeverityLevel {
        SeverityLevel::RecoverableError
    }
}
