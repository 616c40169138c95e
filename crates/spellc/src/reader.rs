use spell_core::path::normalize;
use spell_transform::SourceReader;

/// The default file-read collaborator: resolves imports straight from the
/// local filesystem, relative to the process working directory.
#[derive(Debug, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_text(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(normalize(path))
    }
}
