//! Playlist state
//!
//! Owns the ordered track list, the current index and the repeat-one flag.
//! The current index is persisted after every change; persistence is
//! best-effort and never fails an operation.

use crate::shuffle::{shuffle_tracks, shuffle_tracks_with};
use crate::store::IndexStore;
use crate::types::{LoadStatus, Track};
use rand::Rng;

/// Wrap `index` into `[0, len)` in both directions
///
/// Equivalent to `((index % len) + len) % len`. `len` must be non-zero.
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Ordered playlist with a wrapping cursor
pub struct PlaylistState {
    tracks: Vec<Track>,
    status: LoadStatus,
    current_index: usize,
    repeat_one: bool,
    store: Box<dyn IndexStore>,
}

impl PlaylistState {
    /// Create an unloaded playlist backed by `store`
    pub fn new(store: Box<dyn IndexStore>) -> Self {
        Self {
            tracks: Vec::new(),
            status: LoadStatus::Pending,
            current_index: 0,
            repeat_one: false,
            store,
        }
    }

    /// Replace the playlist
    ///
    /// Adopts the persisted index when it is within bounds, otherwise resets
    /// to 0.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.status = LoadStatus::Loaded;
        self.current_index = self
            .restored_index()
            .filter(|&index| index < self.tracks.len())
            .unwrap_or(0);

        if !self.tracks.is_empty() {
            self.persist();
        }
    }

    /// Drop any loaded tracks and record that loading failed
    pub fn mark_failed(&mut self) {
        self.tracks.clear();
        self.status = LoadStatus::Failed;
        self.current_index = 0;
    }

    /// Move the cursor to `index`, wrapping in both directions
    ///
    /// Returns false (and does nothing) when the playlist is empty.
    pub fn select_index(&mut self, index: i64) -> bool {
        if self.tracks.is_empty() {
            return false;
        }
        self.current_index = wrap_index(index, self.tracks.len());
        self.persist();
        true
    }

    /// Step forward one track (wrapping)
    pub fn select_next(&mut self) -> bool {
        self.select_index(self.current_index as i64 + 1)
    }

    /// Step back one track (wrapping)
    pub fn select_previous(&mut self) -> bool {
        self.select_index(self.current_index as i64 - 1)
    }

    /// Shuffle in place and reset the cursor to the first track
    pub fn shuffle(&mut self) {
        shuffle_tracks(&mut self.tracks);
        self.select_index(0);
    }

    /// Shuffle with a caller-provided random source
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle_tracks_with(&mut self.tracks, rng);
        self.select_index(0);
    }

    /// Flip repeat-one and return the new value
    pub fn toggle_repeat_one(&mut self) -> bool {
        self.repeat_one = !self.repeat_one;
        self.repeat_one
    }

    // ===== State Queries =====

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Current index (`None` while the playlist is empty)
    pub fn current_index(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.current_index)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    pub fn repeat_one(&self) -> bool {
        self.repeat_one
    }

    fn restored_index(&self) -> Option<usize> {
        match self.store.load_index() {
            Ok(index) => index.and_then(|i| usize::try_from(i).ok()),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable persisted index");
                None
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save_index(self.current_index) {
            tracing::debug!(error = %e, index = self.current_index, "Failed to persist index");
        }
    }
}

impl std::fmt::Debug for PlaylistState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistState")
            .field("tracks", &self.tracks.len())
            .field("status", &self.status)
            .field("current_index", &self.current_index)
            .field("repeat_one", &self.repeat_one)
            .finish_non_exhaustive()
    }
}
