//! Media sink that logs instead of playing

use om_playback::{MediaError, MediaSink};
use tracing::info;

/// Logs every media call; playback requests always succeed
#[derive(Debug, Default)]
pub struct TerminalSink {
    src: Option<String>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last loaded source
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

impl MediaSink for TerminalSink {
    fn load(&mut self, src: &str) {
        info!(src, "Loading media");
        self.src = Some(src.to_string());
    }

    fn request_play(&mut self) -> Result<(), MediaError> {
        match &self.src {
            Some(src) => {
                info!(src = %src, "Playing");
                Ok(())
            }
            None => Err(MediaError::PlaybackRejected("no source loaded".to_string())),
        }
    }

    fn pause(&mut self) {
        info!("Paused");
    }

    fn seek(&mut self, position: f64) {
        info!(position, "Seeking");
    }
}
