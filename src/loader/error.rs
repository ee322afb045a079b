//! Loader error types.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a [`DocumentFetcher`](super::DocumentFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid source URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("source '{0}' cannot be converted to a local path")]
    InvalidSource(String),

    #[error("unsupported source scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Reasons a configuration load fell back to the default.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
