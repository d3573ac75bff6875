//! CLI error types.

use folio_config::ConfigError;
use folio_media::MediaError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Media(#[from] MediaError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}
