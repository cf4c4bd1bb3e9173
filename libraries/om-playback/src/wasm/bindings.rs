//! Browser capability implementations

use crate::error::{LoadError, LoadResult, MediaError, StoreError, StoreResult};
use crate::metadata::MetadataSource;
use crate::source::MediaSink;
use crate::store::IndexStore;
use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_storage::{errors::StorageError, LocalStorage, Storage};
use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlAudioElement, RequestCache};

/// Play promise waiting to settle
pub type PendingPlay = Rc<RefCell<Option<Promise>>>;

/// Media sink driving an `<audio>` element
///
/// `play()` returns a promise; it is parked in the shared slot and the
/// owner settles it into a `PlayStarted`/`PlayRejected` event.
pub struct HtmlAudioSink {
    audio: HtmlAudioElement,
    pending: PendingPlay,
}

impl HtmlAudioSink {
    pub fn new(audio: HtmlAudioElement, pending: PendingPlay) -> Self {
        Self { audio, pending }
    }
}

impl MediaSink for HtmlAudioSink {
    fn load(&mut self, src: &str) {
        self.audio.set_src(src);
    }

    fn request_play(&mut self) -> Result<(), MediaError> {
        let promise = self
            .audio
            .play()
            .map_err(|e| MediaError::PlaybackRejected(format!("{:?}", e)))?;
        *self.pending.borrow_mut() = Some(promise);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            tracing::debug!(error = ?e, "pause() threw");
        }
    }

    fn seek(&mut self, position: f64) {
        self.audio.set_current_time(position);
    }
}

/// Index store backed by `window.localStorage`
pub struct LocalStorageIndexStore {
    key: String,
}

impl LocalStorageIndexStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl IndexStore for LocalStorageIndexStore {
    fn load_index(&self) -> StoreResult<Option<i64>> {
        match LocalStorage::get::<i64>(&self.key) {
            Ok(index) => Ok(Some(index)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(e)) => Err(StoreError::Corrupt(e.to_string())),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }

    fn save_index(&mut self, index: usize) -> StoreResult<()> {
        LocalStorage::set(&self.key, index as i64)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

/// Metadata document fetched with `fetch()`, bypassing the HTTP cache
pub struct FetchMetadataSource {
    url: String,
}

impl FetchMetadataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl MetadataSource for FetchMetadataSource {
    async fn fetch(&self) -> LoadResult<String> {
        let response = Request::get(&self.url)
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(LoadError::NotFound(format!(
                "{} not found (status {})",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))
    }
}
