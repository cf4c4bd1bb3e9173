//! Platform-agnostic media sink trait
//!
//! Abstracts the single media element the player drives (an
//! `HTMLAudioElement` in the browser, a logging stub on the terminal).

use crate::error::MediaError;

/// The media element the controller plays through
///
/// The sink never reports back by itself. The platform forwards the
/// element's lifecycle (metadata loaded, time update, ended, error, and the
/// settlement of play requests) as [`MediaEvent`](crate::MediaEvent)s.
pub trait MediaSink {
    /// Point the element at a new source URI
    ///
    /// Loading a source stops whatever was playing.
    fn load(&mut self, src: &str);

    /// Ask the engine to start playback
    ///
    /// # Returns
    /// * `Ok(())` - Request is pending, settlement arrives later as
    ///   `PlayStarted` or `PlayRejected`
    /// * `Err(_)` - Engine refused synchronously
    fn request_play(&mut self) -> Result<(), MediaError>;

    /// Pause playback (always succeeds)
    fn pause(&mut self);

    /// Move the playhead to `position` seconds
    fn seek(&mut self, position: f64);
}

/// Recording sink for unit tests
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub calls: std::rc::Rc<std::cell::RefCell<Vec<SinkCall>>>,
    pub reject_play: bool,
}

/// A call received by [`RecordingSink`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
}

#[cfg(test)]
impl RecordingSink {
    pub fn take(&self) -> Vec<SinkCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

#[cfg(test)]
impl MediaSink for RecordingSink {
    fn load(&mut self, src: &str) {
        self.calls.borrow_mut().push(SinkCall::Load(src.to_string()));
    }

    fn request_play(&mut self) -> Result<(), MediaError> {
        self.calls.borrow_mut().push(SinkCall::Play);
        if self.reject_play {
            return Err(MediaError::PlaybackRejected("NotAllowedError".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(SinkCall::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.calls.borrow_mut().push(SinkCall::Seek(position));
    }
}
