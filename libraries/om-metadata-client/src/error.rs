//! Error types for the metadata client.

use om_playback::LoadError;
use thiserror::Error;

/// Errors that can occur when fetching the metadata document.
#[derive(Error, Debug)]
pub enum MetadataClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    /// Invalid base URL or document path
    #[error("Invalid metadata URL: {0}")]
    InvalidUrl(String),
}

/// Result type for metadata client operations.
pub type Result<T> = std::result::Result<T, MetadataClientError>;

impl From<MetadataClientError> for LoadError {
    fn from(err: MetadataClientError) -> Self {
        match err {
            MetadataClientError::Status { .. } => LoadError::NotFound(err.to_string()),
            MetadataClientError::Request(_) | MetadataClientError::InvalidUrl(_) => {
                LoadError::Transport(err.to_string())
            }
        }
    }
}
