//! Core types for the player

use serde::{Deserialize, Serialize};

/// Track information for the playlist
///
/// Optional fields hold an empty string when unset, which is what metadata
/// ingestion produces for absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// File reference (relative to the media folder, or an absolute URI)
    ///
    /// Never empty for tracks produced by the metadata loader.
    pub file: String,

    /// Track title (empty = display the file name)
    #[serde(default)]
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Explicit cover URI (empty = probe the cover folder)
    #[serde(default)]
    pub cover: String,
}

impl Track {
    /// Create a track with only a file reference
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set an explicit cover URI
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = cover.into();
        self
    }

    /// Whether the track names its own cover
    pub fn has_cover(&self) -> bool {
        !self.cover.is_empty()
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Not playing (initial state)
    #[default]
    Paused,

    /// Play requested, waiting for the media engine to settle
    Starting,

    /// Media engine confirmed playback
    Playing,
}

/// Whether the playlist has been loaded yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Metadata has not arrived yet
    #[default]
    Pending,

    /// Metadata loaded (the playlist may still be empty)
    Loaded,

    /// Metadata could not be loaded
    Failed,
}

/// What the cover display currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum CoverDisplay {
    /// Showing a candidate URI (it may still fail to load)
    Showing(String),

    /// No candidate left, cover hidden
    #[default]
    Hidden,
}

impl CoverDisplay {
    /// Source currently shown, if any
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Showing(src) => Some(src),
            Self::Hidden => None,
        }
    }
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Folder prefix for relative media files (default: "music/")
    pub media_folder: String,

    /// Folder probed for implicit covers (default: "cover/")
    pub cover_folder: String,

    /// Cover extensions, probed in order (default: jpg, png)
    pub cover_extensions: Vec<String>,

    /// Location of the metadata document (default: "service/music.json")
    pub metadata_url: String,

    /// Storage key of the persisted index (default: "om_current")
    pub index_key: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            media_folder: "music/".to_string(),
            cover_folder: "cover/".to_string(),
            cover_extensions: vec!["jpg".to_string(), "png".to_string()],
            metadata_url: "service/music.json".to_string(),
            index_key: "om_current".to_string(),
        }
    }
}
