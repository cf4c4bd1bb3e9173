//! Om Player Metadata Client
//!
//! Native HTTP implementation of [`om_playback::MetadataSource`].
//!
//! The track list document is fetched fresh on every load (`Cache-Control:
//! no-store`); a non-success status maps to `LoadError::NotFound` so the
//! player falls back to its "no metadata" state.
//!
//! # Example
//!
//! ```ignore
//! use om_metadata_client::MetadataClient;
//! use om_playback::MetadataLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MetadataClient::new("https://music.example.com/", "service/music.json")?;
//!     let tracks = MetadataLoader::load(&client).await?;
//!     println!("Found {} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::MetadataClient;
pub use error::{MetadataClientError, Result};
