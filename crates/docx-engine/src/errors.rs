//! Error types for template filling

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Failed to open archive {path}: {reason}")]
    ArchiveOpen { path: PathBuf, reason: String },

    #[error("Part '{0}' not found in template archive")]
    PartNotFound(String),

    #[error("Part '{0}' is not valid UTF-8 text")]
    PartEncoding(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
