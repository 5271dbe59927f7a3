use crate::domain::{SpectrumError, SpectrumResult, TextDocument};
use std::fs;
use std::path::Path;

/// Reads `path` into a document, or an empty one if the file cannot be read.
///
/// Callers must treat an empty document as a load failure.
pub fn load_lines(path: &Path) -> TextDocument {
    match fs::read(path) {
        Ok(bytes) => TextDocument::from_text(&String::from_utf8_lossy(&bytes)),
        Err(source) => {
            tracing::error!("Unable to open file: {} ({})", path.display(), source);
            TextDocument::default()
        }
    }
}

/// [`load_lines`], with an empty result turned into [`SpectrumError::FileLoad`].
pub fn read_document(path: &Path) -> SpectrumResult<TextDocument> {
    let document = load_lines(path);
    if document.is_empty() {
        return Err(SpectrumError::file_load(
            path,
            "file is missing, unreadable or empty",
        ));
    }
    tracing::debug!("loaded {} lines from {}", document.len(), path.display());
    Ok(document)
}
