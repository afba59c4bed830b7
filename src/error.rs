//! Domain errors
//!
//! I/O and parse failures from third-party crates are carried by `anyhow`
//! with context; the variants here are the failures notelog itself detects.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotelogError {
    #[error("Source document not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Not a word-processing document: {path} has no {part}")]
    MissingDocumentPart { path: PathBuf, part: String },

    #[error("Malformed document XML in {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl NotelogError {
    pub fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
