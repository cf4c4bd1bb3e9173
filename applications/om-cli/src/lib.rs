//! Om Player - headless driver
//!
//! Wires [`om_playback::PlaybackController`] to the terminal: the index is
//! persisted in a small JSON file and media calls are logged instead of
//! played.

pub mod config;
pub mod error;
pub mod sink;
pub mod store;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use sink::TerminalSink;
pub use store::FileIndexStore;
