//! Player events
//!
//! Three channels connect the core to its host:
//! - [`Intent`]: user actions coming in from the UI
//! - [`MediaEvent`]: media element lifecycle coming in from the platform
//! - [`PlayerEvent`]: state changes going out, telling the UI to re-project

use crate::types::{CoverDisplay, PlaybackState};
use serde::{Deserialize, Serialize};

/// User intents forwarded by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// Play/pause button
    TogglePlay,

    /// Next button
    Next,

    /// Previous button
    Previous,

    /// Playlist row activated (index wraps)
    Select(i64),

    /// Shuffle button
    Shuffle,

    /// Repeat button
    ToggleRepeat,

    /// Seek control moved, as a percentage in [0, 100]
    Seek(f64),
}

/// Media element lifecycle reported by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Duration became known
    LoadedMetadata {
        /// Duration in seconds
        duration: f64,
    },

    /// Playhead moved
    TimeUpdate {
        /// Current position in seconds
        current_time: f64,
        /// Duration in seconds (NaN while unknown)
        duration: f64,
    },

    /// Track played to the end
    Ended,

    /// Current source failed to load or decode
    Error {
        /// Platform error description
        message: String,
    },

    /// A pending play request succeeded
    PlayStarted,

    /// A pending play request was refused
    PlayRejected {
        /// Platform rejection reason
        reason: String,
    },

    /// The shown cover candidate loaded
    CoverLoaded {
        /// Candidate that loaded
        src: String,
    },

    /// The shown cover candidate failed
    CoverFailed {
        /// Candidate that failed
        src: String,
    },
}

/// Events emitted by the controller for UI synchronization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current track changed (or was reloaded)
    TrackChanged {
        /// Index of the new current track
        index: usize,
        /// Resolved media source
        src: String,
    },

    /// Playlist contents or load status changed
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Cover display changed
    CoverChanged {
        /// New cover display
        cover: CoverDisplay,
    },

    /// Repeat-one toggled
    RepeatChanged {
        /// New repeat-one flag
        repeat_one: bool,
    },

    /// Position or duration changed
    PositionUpdate {
        /// Current position in seconds
        current_time: f64,
        /// Duration in seconds, if known
        duration: Option<f64>,
    },

    /// A non-fatal error was absorbed
    Error {
        /// Error message
        message: String,
    },
}
