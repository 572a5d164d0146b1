use std::fs;

use crate::error::SourceError;

/// Reads a whole file into a string
pub fn file_get(path: &str) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_string(),
        source,
    })
}

/// Writes `content` to `path`, replacing any existing file
pub fn file_write(path: &str, content: &str) -> Result<(), SourceError> {
    fs::write(path, content).map_err(|source| SourceError::Io {
        path: path.to_string(),
        source,
    })
}
