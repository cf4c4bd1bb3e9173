//! Metadata loading
//!
//! Fetches the track list document and normalizes it into [`Track`]s.
//!
//! The document is a JSON array of objects:
//!
//! ```json
//! [
//!   { "file": "track1.mp3", "title": "Song Title", "artist": "Artist Name", "cover": "cover/track1.jpg" },
//!   { "filename": "track2.mp3", "title": "Another Song" }
//! ]
//! ```

use crate::error::{LoadError, LoadResult};
use crate::types::Track;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Field names tried, in order, for the file reference
const FILE_FIELDS: [&str; 3] = ["file", "filename", "path"];

/// Source of the raw metadata document
///
/// Implementations fetch fresh on every call (no caching).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MetadataSource {
    /// Fetch the document body
    ///
    /// # Errors
    /// * `LoadError::NotFound` - transport reported non-success
    /// * `LoadError::Transport` - request could not be made
    async fn fetch(&self) -> LoadResult<String>;
}

/// Normalizes metadata documents into tracks
pub struct MetadataLoader;

impl MetadataLoader {
    /// Fetch and parse the document from `source`
    pub async fn load<S: MetadataSource + ?Sized>(source: &S) -> LoadResult<Vec<Track>> {
        let body = source.fetch().await?;
        Self::parse(&body)
    }

    /// Parse a document body
    ///
    /// Records without a file reference are dropped, not reported.
    pub fn parse(body: &str) -> LoadResult<Vec<Track>> {
        let document: Value = serde_json::from_str(body)?;
        let Value::Array(records) = document else {
            return Err(LoadError::Format("expected JSON array".to_string()));
        };

        let total = records.len();
        let tracks: Vec<Track> = records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let track = record.as_object().and_then(normalize_record);
                if track.is_none() {
                    tracing::debug!(position, "Dropping metadata record without file reference");
                }
                track
            })
            .collect();

        tracing::info!(loaded = tracks.len(), dropped = total - tracks.len(), "Metadata parsed");
        Ok(tracks)
    }
}

fn normalize_record(record: &Map<String, Value>) -> Option<Track> {
    let file = FILE_FIELDS
        .iter()
        .find_map(|field| string_field(record, field))?;

    Some(Track {
        file: file.to_string(),
        title: display_field(record, "title").unwrap_or_default(),
        artist: display_field(record, "artist").unwrap_or_default(),
        cover: display_field(record, "cover").unwrap_or_default(),
    })
}

/// Display text of `field`: non-empty strings, or non-zero numbers as written
fn display_field(record: &Map<String, Value>, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty string value of `field`
fn string_field<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Metadata document held in memory
#[derive(Debug, Clone)]
pub struct InlineMetadataSource {
    body: String,
}

impl InlineMetadataSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MetadataSource for InlineMetadataSource {
    async fn fetch(&self) -> LoadResult<String> {
        Ok(self.body.clone())
    }
}

/// Metadata document read from the local filesystem
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileMetadataSource {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileMetadataSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl MetadataSource for FileMetadataSource {
    // Blocking read: the document is small and only read once per load.
    // Long-running async hosts should read it with their own runtime's fs.
    async fn fetch(&self) -> LoadResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(format!("{} not found", self.path.display()))
            } else {
                LoadError::Transport(format!("{}: {}", self.path.display(), e))
            }
        })
    }
}
