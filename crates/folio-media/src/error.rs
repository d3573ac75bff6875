use std::path::PathBuf;

/// Media storage error.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source path does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Invalid object key: {0:?}")]
    InvalidKey(String),
}
