/// Per-file compile options, threaded through the parser and the transform.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The path of the file that's currently being compiled.
    pub file_path: String,

    /// Rewrite `.ts` script sources to `.js` in the generated output.
    pub convert_script_extension: bool,

    /// Minify inline script bodies when compiling them.
    pub minify_scripts: bool,

    /// The output-relative anchor path used to rewrite link-bearing
    /// attribute values when this file is inlined from another file.
    /// `None` outside of an import.
    pub path_remap_target: Option<String>,
}

impl CompileOptions {
    pub fn new(file_path: impl Into<String>) -> CompileOptions {
        CompileOptions {
            file_path: file_path.into(),
            ..CompileOptions::default()
        }
    }

    /// The options an imported file is parsed with: the file path points at
    /// the resolved import, and links keep resolving against the original
    /// root file so they stay correct at the final output location.
    pub fn for_import(&self, resolved_path: impl Into<String>) -> CompileOptions {
        CompileOptions {
            file_path: resolved_path.into(),
            convert_script_extension: self.convert_script_extension,
            minify_scripts: self.minify_scripts,
            path_remap_target: Some(
                self.path_remap_target
                    .clone()
                    .unwrap_or_else(|| self.file_path.clone()),
            ),
        }
    }
}
