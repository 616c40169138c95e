use crate::error::ScriptCompileError;

/// The file-read collaborator used to load imported files.
pub trait SourceReader {
    fn read_text(&self, path: &str) -> std::io::Result<String>;
}

/// The embedded-script compiler collaborator, used for inline `script`
/// bodies. When `file_name` is given, the result embeds a source-map
/// reference usable for debugging.
pub trait ScriptCompiler {
    fn compile(
        &self,
        source: &str,
        file_name: Option<&str>,
        minify: bool,
    ) -> Result<String, ScriptCompileError>;
}

/// A reader that refuses every import. Useful for single-file compiles
/// and tests.
#[derive(Debug, Default)]
pub struct NoImports;

impl SourceReader for NoImports {
    fn read_text(&self, path: &str) -> std::io::Result<String> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no source reader configured, cannot import `{path}`"),
        ))
    }
}

/// A compiler that passes inline scripts through untouched.
#[derive(Debug, Default)]
pub struct PassthroughScripts;

impl ScriptCompiler for PassthroughScripts {
    fn compile(
        &self,
        source: &str,
        _file_name: Option<&str>,
        _minify: bool,
    ) -> Result<String, ScriptCompileError> {
        Ok(source.to_string())
    }
}
