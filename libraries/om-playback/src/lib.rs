//! Om Player - Playback Core
//!
//! Platform-agnostic playlist player state machine.
//!
//! This crate provides:
//! - Metadata loading (JSON track list, tolerant of partial records)
//! - Cover art resolution (explicit cover, or `.jpg` then `.png` probing)
//! - Playlist state (wrapping navigation, Fisher-Yates shuffle, repeat-one,
//!   persisted current index)
//! - Playback control (play/pause/seek, media lifecycle handling)
//! - A read-only UI projection
//!
//! # Architecture
//!
//! `om-playback` never touches the DOM, the network or storage directly.
//! Those are injected as capabilities:
//! - [`MediaSink`]: the single media element
//! - [`MetadataSource`]: where the track list comes from
//! - [`IndexStore`]: where the current index is persisted
//!
//! User actions come in as [`Intent`]s, media element lifecycle comes in as
//! [`MediaEvent`]s, and state changes go out as [`PlayerEvent`]s. The UI
//! re-renders from [`project`].
//!
//! With the `wasm` feature, `wasm::WasmPlayer` wires all of this to an
//! `HTMLAudioElement`, `localStorage` and `fetch`.
//!
//! # Example
//!
//! ```rust
//! use om_playback::{
//!     project, InlineMetadataSource, Intent, MediaError, MediaEvent, MediaSink,
//!     MemoryIndexStore, PlaybackController, PlayerConfig,
//! };
//!
//! // Implement MediaSink for your platform
//! struct SilentSink;
//!
//! impl MediaSink for SilentSink {
//!     fn load(&mut self, _src: &str) {}
//!     fn request_play(&mut self) -> Result<(), MediaError> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: f64) {}
//! }
//!
//! # tokio_test_block_on(async {
//! let mut player = PlaybackController::new(
//!     PlayerConfig::default(),
//!     Box::new(SilentSink),
//!     Box::new(MemoryIndexStore::new()),
//! );
//!
//! let source = InlineMetadataSource::new(r#"[{"file": "t1.mp3"}, {"file": "t2.mp3"}]"#);
//! player.load_from(&source).await;
//!
//! player.dispatch(Intent::Previous);
//! player.handle_media_event(MediaEvent::PlayStarted);
//!
//! let view = project(&player);
//! assert_eq!(view.title, "t2.mp3");
//! assert_eq!(view.play_label, "Pause");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod controller;
mod cover;
mod error;
mod events;
mod metadata;
mod playlist;
mod projector;
mod shuffle;
mod source;
mod store;
pub mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

// Public exports
pub use controller::PlaybackController;
pub use cover::{file_basename, resolve_media_path, strip_extension, CoverCandidates, CoverResolver};
pub use error::{LoadError, LoadResult, MediaError, StoreError, StoreResult};
pub use events::{Intent, MediaEvent, PlayerEvent};
#[cfg(not(target_arch = "wasm32"))]
pub use metadata::FileMetadataSource;
pub use metadata::{InlineMetadataSource, MetadataLoader, MetadataSource};
pub use playlist::{wrap_index, PlaylistState};
pub use projector::{
    format_time, project, PlayerView, PlaylistRow, NO_METADATA_MESSAGE, NO_TRACKS_MESSAGE,
};
pub use shuffle::{shuffle_tracks, shuffle_tracks_with};
pub use source::MediaSink;
pub use store::{parse_stored_index, IndexStore, MemoryIndexStore};
pub use types::{CoverDisplay, LoadStatus, PlaybackState, PlayerConfig, Track};
