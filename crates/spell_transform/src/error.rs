use spell_core::{Severity, SeverityLevel};
use spell_parser::ParseError;

#[derive(Debug)]
pub enum TransformError {
    /// An import tag without a file path in its text body.
    MissingImportPath { file: String, tag: String },

    /// The file-read collaborator failed to load an imported file.
    ImportRead { path: String, source: std::io::Error },

    /// Parsing an imported file failed.
    Parse(ParseError),

    /// The script-compiler collaborator rejected an inline script body.
    ScriptCompile(ScriptCompileError),
}

/// Error reported by a [`ScriptCompiler`](crate::ScriptCompiler)
/// implementation, already rendered to a message.
#[derive(Debug)]
pub struct ScriptCompileError {
    pub message: String,
}

impl From<ParseError> for TransformError {
    fn from(value: ParseError) -> Self {
        TransformError::Parse(value)
    }
}

impl From<ScriptCompileError> for TransformError {
    fn from(value: ScriptCompileError) -> Self {
        TransformError::ScriptCompile(value)
    }
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::MissingImportPath { file, tag } => {
                write!(f, "{file}: `{tag}` needs a file to import")
            }
            TransformError::ImportRead { path, source } => {
                write!(f, "failed to read import `{path}`: {source}")
            }
            TransformError::Parse(e) => e.fmt(f),
            TransformError::ScriptCompile(e) => {
                write!(f, "failed to compile inline script: {}", e.message)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl Severity for TransformError {
    fn severity(&self) -> SeverityLevel {
        match self {
            // No import path and bad syntax abort the whole compile
            TransformError::MissingImportPath { .. } => SeverityLevel::UnrecoverableError,
            TransformError::Parse(e) => e.severity(),
            // A missing file or a bad script only costs this file's output
            TransformError::ImportRead { .. } => SeverityLevel::RecoverableError,
            TransformError::ScriptCompile(_) => SeverityLevel::RecoverableError,
        }
    }
}
