//! Error types for the player core
//!
//! None of these are fatal. The controller absorbs each of them at the
//! boundary and turns it into a UI state change or a corrective transition.

use thiserror::Error;

/// Metadata loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// The transport reported a non-success status
    #[error("Metadata not found: {0}")]
    NotFound(String),

    /// The document could not be fetched at all
    #[error("Metadata transport failed: {0}")]
    Transport(String),

    /// The body was not a JSON array
    #[error("Invalid metadata format: {0}")]
    Format(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Persisted index storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend could not be reached
    #[error("Index storage unavailable: {0}")]
    Unavailable(String),

    /// Stored value could not be read back as an index
    #[error("Stored index is corrupt: {0}")]
    Corrupt(String),
}

/// Media engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The engine refused to start playback
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// A media file failed to load or decode
    #[error("Media failed to load: {0}")]
    MediaLoad(String),
}

/// Result type for metadata loading
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Result type for index storage
pub type StoreResult<T> = std::result::Result<T, StoreError>;
