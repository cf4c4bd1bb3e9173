//! WASM bindings for om-playback
//!
//! Browser implementations of the capability traits, plus a JavaScript-facing
//! wrapper around [`PlaybackController`](crate::PlaybackController).

pub mod bindings;
pub mod manager;

pub use bindings::{FetchMetadataSource, HtmlAudioSink, LocalStorageIndexStore};
pub use manager::WasmPlayer;
