//! Playlist randomization
//!
//! Pure random shuffle (Fisher-Yates): every permutation is equally likely
//! for a uniform random source.

use crate::types::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle tracks in place using the thread-local generator
pub fn shuffle_tracks(tracks: &mut [Track]) {
    shuffle_tracks_with(tracks, &mut rand::thread_rng());
}

/// Shuffle tracks in place using `rng`
///
/// Walks the slice from the back, swapping each position with a uniformly
/// chosen position at or before it.
pub fn shuffle_tracks_with<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}
