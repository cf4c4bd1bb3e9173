//! Playback controller - core orchestration
//!
//! Owns the playlist, the media sink and the cover state, and maps intents
//! and media events into state transitions.

use crate::{
    cover::{resolve_media_path, CoverCandidates, CoverResolver},
    error::LoadError,
    events::{Intent, MediaEvent, PlayerEvent},
    metadata::{MetadataLoader, MetadataSource},
    playlist::PlaylistState,
    source::MediaSink,
    store::IndexStore,
    types::{CoverDisplay, PlaybackState, PlayerConfig, Track},
};
use rand::Rng;

/// Central player state machine
///
/// Every transition is synchronous. Starting playback is split in two: the
/// controller asks the sink and enters `Starting`, and the platform later
/// reports `PlayStarted` or `PlayRejected`.
pub struct PlaybackController {
    config: PlayerConfig,

    // State
    state: PlaybackState,
    playlist: PlaylistState,

    // Media element
    sink: Box<dyn MediaSink>,
    current_src: Option<String>,
    current_time: f64,
    duration: f64,

    // Cover art
    covers: CoverResolver,
    cover_candidates: Option<CoverCandidates>,
    cover: CoverDisplay,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackController {
    /// Create a controller with an unloaded playlist
    pub fn new(
        config: PlayerConfig,
        sink: Box<dyn MediaSink>,
        store: Box<dyn IndexStore>,
    ) -> Self {
        Self {
            covers: CoverResolver::new(&config),
            config,
            state: PlaybackState::Paused,
            playlist: PlaylistState::new(store),
            sink,
            current_src: None,
            current_time: 0.0,
            duration: f64::NAN,
            cover_candidates: None,
            cover: CoverDisplay::Hidden,
            pending_events: Vec::new(),
        }
    }

    // ===== Loading =====

    /// Load the playlist from `source`
    ///
    /// Failures are absorbed into the "no metadata" state.
    pub async fn load_from<S: MetadataSource + ?Sized>(&mut self, source: &S) {
        match MetadataLoader::load(source).await {
            Ok(tracks) => self.set_tracks(tracks),
            Err(e) => self.load_failed(&e),
        }
    }

    /// Replace the playlist and load the restored current track
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.playlist.set_tracks(tracks);
        tracing::info!(
            tracks = self.playlist.len(),
            index = ?self.playlist.current_index(),
            "Playlist loaded"
        );
        self.emit_playlist_changed();
        self.load_current_track();
    }

    /// Record a failed metadata load
    pub fn load_failed(&mut self, error: &LoadError) {
        tracing::warn!(error = %error, "Failed to load metadata");
        self.playlist.mark_failed();
        // Stop whatever the previous playlist left on the element
        if self.current_src.take().is_some() {
            self.pause();
        }
        self.reset_timing();
        self.set_cover(CoverDisplay::Hidden);
        self.emit_playlist_changed();
        self.emit_error(error.to_string());
    }

    // ===== Intents =====

    /// Apply a user intent
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::TogglePlay => self.toggle_play(),
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::Select(index) => self.select(index),
            Intent::Shuffle => self.shuffle(),
            Intent::ToggleRepeat => self.toggle_repeat_one(),
            Intent::Seek(percent) => self.seek(percent),
        }
    }

    /// Pause when playing, otherwise attempt to play
    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Starting => self.play(),
        }
    }

    /// Attempt to start playback of the current track
    ///
    /// Rejections are logged and leave the player paused.
    pub fn play(&mut self) {
        if self.current_src.is_none() {
            return;
        }
        match self.sink.request_play() {
            Ok(()) => {
                if self.state == PlaybackState::Paused {
                    self.set_state(PlaybackState::Starting);
                }
            }
            Err(e) => self.play_rejected(&e.to_string()),
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.sink.pause();
        self.set_state(PlaybackState::Paused);
    }

    /// Skip to next track (wrapping) and play it
    pub fn next(&mut self) {
        if self.playlist.select_next() {
            self.load_current_track();
            self.play();
        }
    }

    /// Go to previous track (wrapping) and play it
    pub fn previous(&mut self) {
        if self.playlist.select_previous() {
            self.load_current_track();
            self.play();
        }
    }

    /// Jump to `index` (wrapping) and play it
    pub fn select(&mut self, index: i64) {
        if self.playlist.select_index(index) {
            self.load_current_track();
            self.play();
        }
    }

    /// Shuffle the playlist and play from the first track
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Shuffle with a caller-provided random source
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.playlist.is_empty() {
            return;
        }
        self.playlist.shuffle_with(rng);
        self.emit_playlist_changed();
        self.load_current_track();
        self.play();
    }

    /// Flip repeat-one
    pub fn toggle_repeat_one(&mut self) {
        let repeat_one = self.playlist.toggle_repeat_one();
        self.pending_events
            .push(PlayerEvent::RepeatChanged { repeat_one });
    }

    /// Seek by percentage of the track duration
    ///
    /// Ignored while the duration is unknown.
    pub fn seek(&mut self, percent: f64) {
        let Some(duration) = self.duration() else {
            return;
        };
        if percent.is_nan() {
            return;
        }
        let position = percent.clamp(0.0, 100.0) / 100.0 * duration;
        self.sink.seek(position);
        self.current_time = position;
        self.emit_position_update();
    }

    // ===== Media Events =====

    /// Apply a media lifecycle event
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata { duration } => {
                self.duration = duration;
                self.emit_position_update();
            }
            MediaEvent::TimeUpdate {
                current_time,
                duration,
            } => {
                self.current_time = current_time;
                self.duration = duration;
                self.emit_position_update();
            }
            MediaEvent::Ended => self.handle_track_finished(),
            MediaEvent::Error { message } => self.handle_media_error(&message),
            MediaEvent::PlayStarted => self.set_state(PlaybackState::Playing),
            MediaEvent::PlayRejected { reason } => self.play_rejected(&reason),
            MediaEvent::CoverLoaded { .. } => {}
            MediaEvent::CoverFailed { src } => {
                // Ignore failures of candidates that are no longer shown
                if self.cover.src() == Some(src.as_str()) {
                    self.show_next_cover();
                }
            }
        }
    }

    fn handle_track_finished(&mut self) {
        if self.current_src.is_none() {
            return;
        }
        // The element pauses itself at the end of a track
        self.set_state(PlaybackState::Paused);

        if self.playlist.repeat_one() {
            self.sink.seek(0.0);
            self.current_time = 0.0;
            self.emit_position_update();
            self.play();
        } else {
            self.next();
        }
    }

    fn handle_media_error(&mut self, message: &str) {
        let Some(src) = self.current_src.clone() else {
            return;
        };
        tracing::warn!(src = %src, error = %message, "Audio error loading, skipping track");
        self.emit_error(format!("Failed to load {}: {}", src, message));

        if self.playlist.select_next() {
            self.load_current_track();
        }
    }

    fn play_rejected(&mut self, reason: &str) {
        tracing::warn!(reason = %reason, "Playback failed");
        self.set_state(PlaybackState::Paused);
    }

    // ===== Track Loading =====

    /// Point the sink at the current track and restart cover probing
    fn load_current_track(&mut self) {
        let Some((index, track)) = self
            .playlist
            .current_index()
            .zip(self.playlist.current_track().cloned())
        else {
            return;
        };

        let src = resolve_media_path(&track.file, &self.config.media_folder);
        self.sink.load(&src);
        self.set_state(PlaybackState::Paused);
        self.current_src = Some(src.clone());
        self.reset_timing();

        self.cover_candidates = Some(self.covers.resolve(&track));
        self.show_next_cover();

        tracing::debug!(index, src = %src, "Track loaded");
        self.pending_events
            .push(PlayerEvent::TrackChanged { index, src });
    }

    fn show_next_cover(&mut self) {
        let next = self.cover_candidates.as_mut().and_then(Iterator::next);
        match next {
            Some(src) => self.set_cover(CoverDisplay::Showing(src)),
            None => {
                self.cover_candidates = None;
                self.set_cover(CoverDisplay::Hidden);
            }
        }
    }

    fn set_cover(&mut self, cover: CoverDisplay) {
        if self.cover != cover {
            self.cover = cover.clone();
            self.pending_events.push(PlayerEvent::CoverChanged { cover });
        }
    }

    fn reset_timing(&mut self) {
        self.current_time = 0.0;
        self.duration = f64::NAN;
    }

    // ===== State Queries =====

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the media engine confirmed playback
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn playlist(&self) -> &PlaylistState {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current_track()
    }

    /// Resolved media source of the current track
    pub fn current_src(&self) -> Option<&str> {
        self.current_src.as_deref()
    }

    pub fn cover(&self) -> &CoverDisplay {
        &self.cover
    }

    /// Current position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Track duration in seconds, when known
    pub fn duration(&self) -> Option<f64> {
        (self.duration.is_finite() && self.duration > 0.0).then_some(self.duration)
    }

    // ===== Events =====

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_playlist_changed(&mut self) {
        let length = self.playlist.len();
        self.pending_events
            .push(PlayerEvent::PlaylistChanged { length });
    }

    fn emit_position_update(&mut self) {
        let current_time = self.current_time;
        let duration = self.duration();
        self.pending_events.push(PlayerEvent::PositionUpdate {
            current_time,
            duration,
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlayerEvent::Error { message });
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("playlist", &self.playlist)
            .field("current_src", &self.current_src)
            .field("cover", &self.cover)
            .finish_non_exhaustive()
    }
}
