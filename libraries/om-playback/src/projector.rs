//! Read-only UI projection
//!
//! Turns controller state into display-ready values. Nothing here mutates
//! domain state; the UI forwards user actions back as [`Intent`](crate::Intent)s.

use crate::controller::PlaybackController;
use crate::cover::file_basename;
use crate::types::LoadStatus;
use serde::{Deserialize, Serialize};

/// Shown for a loaded but empty playlist
pub const NO_TRACKS_MESSAGE: &str = "No tracks found. Create service/music.json with track entries.";

/// Shown after the metadata document failed to load
pub const NO_METADATA_MESSAGE: &str =
    "No metadata found. Create service/music.json with track entries.";

/// Everything the UI renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Current track title (file name when the title is unset)
    pub title: String,

    /// Current track artist
    pub artist: String,

    /// Cover source, `None` = hide the cover
    pub cover: Option<String>,

    /// Play button label
    pub play_label: &'static str,

    /// Repeat button label
    pub repeat_label: &'static str,

    /// Seek control position in [0, 100]
    pub seek_percent: f64,

    /// Elapsed time, `m:ss`
    pub elapsed: String,

    /// Total time, `m:ss`
    pub total: String,

    /// Playlist rows in navigation order
    pub rows: Vec<PlaylistRow>,

    /// Placeholder shown instead of rows
    pub message: Option<&'static str>,
}

/// One rendered playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRow {
    /// `title` (or file) plus ` — artist` when the artist is set
    pub label: String,

    /// Row matches the current index
    pub active: bool,
}

/// Format seconds as `m:ss`
///
/// Unknown, NaN, negative and zero durations format as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Project the controller into a [`PlayerView`]
pub fn project(controller: &PlaybackController) -> PlayerView {
    let playlist = controller.playlist();
    let track = playlist.current_track();

    let title = match (track, controller.current_src()) {
        (Some(track), _) if !track.title.is_empty() => track.title.clone(),
        (_, Some(src)) => file_basename(src).to_string(),
        _ => String::new(),
    };

    let rows = playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let name = if track.title.is_empty() {
                &track.file
            } else {
                &track.title
            };
            let label = if track.artist.is_empty() {
                name.clone()
            } else {
                format!("{} — {}", name, track.artist)
            };
            PlaylistRow {
                label,
                active: playlist.current_index() == Some(index),
            }
        })
        .collect();

    let message = match playlist.status() {
        LoadStatus::Failed => Some(NO_METADATA_MESSAGE),
        LoadStatus::Loaded if playlist.is_empty() => Some(NO_TRACKS_MESSAGE),
        _ => None,
    };

    let current_time = controller.current_time();
    let duration = controller.duration();

    PlayerView {
        title,
        artist: track.map(|t| t.artist.clone()).unwrap_or_default(),
        cover: controller.cover().src().map(str::to_string),
        play_label: if controller.is_playing() { "Pause" } else { "Play" },
        repeat_label: if playlist.repeat_one() {
            "Repeat: ON"
        } else {
            "Toggle Repeat"
        },
        seek_percent: duration.map_or(0.0, |d| (current_time / d * 100.0).clamp(0.0, 100.0)),
        elapsed: format_time(current_time),
        total: format_time(duration.unwrap_or(f64::NAN)),
        rows,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::events::MediaEvent;
    use crate::source::RecordingSink;
    use crate::store::MemoryIndexStore;
    use crate::types::{PlayerConfig, Track};

    fn create_controller() -> PlaybackController {
        PlaybackController::new(
            PlayerConfig::default(),
            Box::new(RecordingSink::default()),
            Box::new(MemoryIndexStore::new()),
        )
    }

    #[test]
    fn format_time_examples() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn pending_playlist_shows_nothing() {
        let view = project(&create_controller());
        assert!(view.rows.is_empty());
        assert_eq!(view.message, None);
        assert_eq!(view.play_label, "Play");
        assert_eq!(view.cover, None);
    }

    #[test]
    fn empty_and_failed_playlists_show_messages() {
        let mut controller = create_controller();
        controller.set_tracks(vec![]);
        assert_eq!(project(&controller).message, Some(NO_TRACKS_MESSAGE));

        controller.load_failed(&LoadError::Format("expected JSON array".to_string()));
        assert_eq!(project(&controller).message, Some(NO_METADATA_MESSAGE));
    }

    #[test]
    fn rows_and_labels() {
        let mut controller = create_controller();
        controller.set_tracks(vec![
            Track::new("a.mp3").with_title("Song A").with_artist("Artist"),
            Track::new("b.mp3"),
        ]);
        controller.select(1);

        let view = project(&controller);
        assert_eq!(view.rows[0].label, "Song A — Artist");
        assert!(!view.rows[0].active);
        assert_eq!(view.rows[1].label, "b.mp3");
        assert!(view.rows[1].active);
        // Title falls back to the resolved source's file name
        assert_eq!(view.title, "b.mp3");
        assert_eq!(view.artist, "");
    }

    #[test]
    fn transport_labels_follow_state() {
        let mut controller = create_controller();
        controller.set_tracks(vec![Track::new("a.mp3")]);

        controller.toggle_play();
        assert_eq!(project(&controller).play_label, "Play");
        controller.handle_media_event(MediaEvent::PlayStarted);
        assert_eq!(project(&controller).play_label, "Pause");

        controller.toggle_repeat_one();
        assert_eq!(project(&controller).repeat_label, "Repeat: ON");
        controller.toggle_repeat_one();
        assert_eq!(project(&controller).repeat_label, "Toggle Repeat");
    }

    #[test]
    fn time_projection() {
        let mut controller = create_controller();
        controller.set_tracks(vec![Track::new("a.mp3")]);

        let view = project(&controller);
        assert_eq!(view.seek_percent, 0.0);
        assert_eq!(view.total, "0:00");

        controller.handle_media_event(MediaEvent::TimeUpdate {
            current_time: 65.0,
            duration: 260.0,
        });
        let view = project(&controller);
        assert_eq!(view.seek_percent, 25.0);
        assert_eq!(view.elapsed, "1:05");
        assert_eq!(view.total, "4:20");
    }

    #[test]
    fn cover_projection() {
        let mut controller = create_controller();
        controller.set_tracks(vec![Track::new("a.mp3")]);
        assert_eq!(project(&controller).cover.as_deref(), Some("cover/a.jpg"));

        controller.handle_media_event(MediaEvent::CoverFailed {
            src: "cover/a.jpg".to_string(),
        });
        controller.handle_media_event(MediaEvent::CoverFailed {
            src: "cover/a.png".to_string(),
        });
        assert_eq!(project(&controller).cover, None);
    }
}
