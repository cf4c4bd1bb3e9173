//! Property-based tests for playlist navigation
//!
//! Uses proptest to verify invariants across many random inputs.

use om_playback::{
    format_time, wrap_index, MemoryIndexStore, PlaylistState, Track,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,10}\\.(mp3|ogg|flac)",        // file
        "[A-Za-z ]{0,30}",                        // title
        "[A-Za-z ]{0,20}",                        // artist
    )
        .prop_map(|(file, title, artist)| Track::new(file).with_title(title).with_artist(artist))
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..50)
}

fn playlist_with(tracks: Vec<Track>, store: MemoryIndexStore) -> PlaylistState {
    let mut playlist = PlaylistState::new(Box::new(store));
    playlist.set_tracks(tracks);
    playlist
}

// ===== Property Tests =====

proptest! {
    /// Property: select_index always lands on the double-modulo position
    #[test]
    fn select_index_wraps_into_range(
        tracks in arbitrary_tracks(),
        index in any::<i64>()
    ) {
        let len = tracks.len();
        let store = MemoryIndexStore::new();
        let mut playlist = playlist_with(tracks, store.clone());

        prop_assert!(playlist.select_index(index));

        let expected = (((index % len as i64) + len as i64) % len as i64) as usize;
        prop_assert_eq!(playlist.current_index(), Some(expected));
        prop_assert!(expected < len);
        prop_assert_eq!(store.get(), Some(expected as i64));
    }

    /// Property: wrap_index agrees with the double-modulo formula
    #[test]
    fn wrap_index_formula(index in any::<i64>(), len in 1usize..10_000) {
        let l = len as i64;
        prop_assert_eq!(wrap_index(index, len) as i64, ((index % l) + l) % l);
    }

    /// Property: select_index on an empty playlist never moves or persists
    #[test]
    fn select_index_on_empty_is_noop(index in any::<i64>()) {
        let store = MemoryIndexStore::new();
        let mut playlist = playlist_with(vec![], store.clone());

        prop_assert!(!playlist.select_index(index));
        prop_assert_eq!(playlist.current_index(), None);
        prop_assert_eq!(store.get(), None);
    }

    /// Property: shuffle produces a permutation and resets the cursor
    #[test]
    fn shuffle_is_permutation(
        tracks in arbitrary_tracks(),
        start in any::<i64>(),
        seed in any::<u64>()
    ) {
        let mut playlist = playlist_with(tracks.clone(), MemoryIndexStore::new());
        playlist.select_index(start);

        playlist.shuffle_with(&mut StdRng::seed_from_u64(seed));

        let mut before: Vec<Track> = tracks;
        let mut after: Vec<Track> = playlist.tracks().to_vec();
        before.sort_by(|a, b| (&a.file, &a.title, &a.artist).cmp(&(&b.file, &b.title, &b.artist)));
        after.sort_by(|a, b| (&a.file, &a.title, &a.artist).cmp(&(&b.file, &b.title, &b.artist)));
        prop_assert_eq!(before, after);
        prop_assert_eq!(playlist.current_index(), Some(0));
    }

    /// Property: a stored index is adopted exactly when it is in range
    #[test]
    fn persisted_index_restored_only_in_range(
        tracks in arbitrary_tracks(),
        stored in -5i64..60
    ) {
        let len = tracks.len() as i64;
        let playlist = playlist_with(tracks, MemoryIndexStore::with_index(stored));

        let expected = if (0..len).contains(&stored) { stored as usize } else { 0 };
        prop_assert_eq!(playlist.current_index(), Some(expected));
    }

    /// Property: formatted time always has two-digit seconds
    #[test]
    fn format_time_shape(seconds in 0.0f64..100_000.0) {
        let formatted = format_time(seconds);
        let (minutes, secs) = formatted.split_once(':').unwrap();
        prop_assert!(minutes.parse::<u64>().is_ok());
        prop_assert_eq!(secs.len(), 2);
        prop_assert!(secs.parse::<u64>().unwrap() < 60);
    }
}
