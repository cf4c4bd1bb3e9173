//! WASM-compatible player wrapper

use super::bindings::{FetchMetadataSource, HtmlAudioSink, LocalStorageIndexStore, PendingPlay};
use crate::{project, Intent, MediaEvent, MetadataLoader, PlaybackController, PlayerConfig};
use js_sys::{Function, Promise};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

type Shared<T> = Rc<RefCell<T>>;

/// WASM-compatible player
///
/// Wraps [`PlaybackController`] with a JavaScript-friendly API. The page
/// forwards button clicks and `<audio>`/`<img>` events here and re-renders
/// from `view()` whenever the render callback fires.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Shared<PlaybackController>,
    pending_play: PendingPlay,
    metadata_url: String,

    // Event callbacks
    on_render: Shared<Option<Function>>,
    on_error: Shared<Option<Function>>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player driving `audio`
    #[wasm_bindgen(constructor)]
    pub fn new(audio: HtmlAudioElement) -> Self {
        console_error_panic_hook::set_once();

        let config = PlayerConfig::default();
        let pending_play: PendingPlay = Rc::new(RefCell::new(None));
        let sink = HtmlAudioSink::new(audio, Rc::clone(&pending_play));
        let store = LocalStorageIndexStore::new(config.index_key.clone());
        let metadata_url = config.metadata_url.clone();

        Self {
            inner: Rc::new(RefCell::new(PlaybackController::new(
                config,
                Box::new(sink),
                Box::new(store),
            ))),
            pending_play,
            metadata_url,
            on_render: Rc::new(RefCell::new(None)),
            on_error: Rc::new(RefCell::new(None)),
        }
    }

    /// Fetch the metadata document and load the playlist
    ///
    /// Resolves once the playlist (or the "no metadata" state) is ready.
    pub fn load(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        let on_render = Rc::clone(&self.on_render);
        let on_error = Rc::clone(&self.on_error);
        let source = FetchMetadataSource::new(self.metadata_url.clone());

        future_to_promise(async move {
            // No borrow is held across the fetch
            let result = MetadataLoader::load(&source).await;
            {
                let mut controller = inner.borrow_mut();
                match result {
                    Ok(tracks) => controller.set_tracks(tracks),
                    Err(e) => controller.load_failed(&e),
                }
            }
            notify(&inner, &on_render, &on_error);
            Ok(JsValue::UNDEFINED)
        })
    }

    // ===== Intents =====

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) {
        self.dispatch(Intent::TogglePlay);
    }

    pub fn next(&self) {
        self.dispatch(Intent::Next);
    }

    pub fn previous(&self) {
        self.dispatch(Intent::Previous);
    }

    /// Playlist row activated
    pub fn select(&self, index: i32) {
        self.dispatch(Intent::Select(i64::from(index)));
    }

    pub fn shuffle(&self) {
        self.dispatch(Intent::Shuffle);
    }

    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&self) {
        self.dispatch(Intent::ToggleRepeat);
    }

    /// Seek control moved (percentage 0-100)
    pub fn seek(&self, percent: f64) {
        self.dispatch(Intent::Seek(percent));
    }

    // ===== Media Events =====

    #[wasm_bindgen(js_name = onLoadedMetadata)]
    pub fn on_loaded_metadata(&self, duration: f64) {
        self.media_event(MediaEvent::LoadedMetadata { duration });
    }

    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&self, current_time: f64, duration: f64) {
        self.media_event(MediaEvent::TimeUpdate {
            current_time,
            duration,
        });
    }

    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&self) {
        self.media_event(MediaEvent::Ended);
    }

    #[wasm_bindgen(js_name = onMediaError)]
    pub fn on_media_error(&self, message: String) {
        self.media_event(MediaEvent::Error { message });
    }

    #[wasm_bindgen(js_name = onCoverLoaded)]
    pub fn on_cover_loaded(&self, src: String) {
        self.media_event(MediaEvent::CoverLoaded { src });
    }

    #[wasm_bindgen(js_name = onCoverError)]
    pub fn on_cover_error(&self, src: String) {
        self.media_event(MediaEvent::CoverFailed { src });
    }

    // ===== State Queries =====

    /// Current projection as a plain JS object
    pub fn view(&self) -> JsValue {
        let view = project(&self.inner.borrow());
        serde_wasm_bindgen::to_value(&view).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.borrow().is_playing()
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<u32> {
        self.inner
            .borrow()
            .playlist()
            .current_index()
            .map(|i| i as u32)
    }

    // ===== Event Listeners =====

    /// Register the render callback, called with the drained events
    #[wasm_bindgen(js_name = onRender)]
    pub fn on_render(&self, callback: Function) {
        *self.on_render.borrow_mut() = Some(callback);
    }

    /// Register the error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        *self.on_error.borrow_mut() = Some(callback);
    }

    // ===== Internal =====

    fn dispatch(&self, intent: Intent) {
        self.inner.borrow_mut().dispatch(intent);
        self.after_transition();
    }

    fn media_event(&self, event: MediaEvent) {
        self.inner.borrow_mut().handle_media_event(event);
        self.after_transition();
    }

    fn after_transition(&self) {
        self.settle_pending_play();
        notify(&self.inner, &self.on_render, &self.on_error);
    }

    /// Turn a parked `play()` promise into a settlement event
    fn settle_pending_play(&self) {
        let Some(promise) = self.pending_play.borrow_mut().take() else {
            return;
        };
        let inner = Rc::clone(&self.inner);
        let on_render = Rc::clone(&self.on_render);
        let on_error = Rc::clone(&self.on_error);

        spawn_local(async move {
            let event = match JsFuture::from(promise).await {
                Ok(_) => MediaEvent::PlayStarted,
                Err(e) => MediaEvent::PlayRejected {
                    reason: format!("{:?}", e),
                },
            };
            inner.borrow_mut().handle_media_event(event);
            notify(&inner, &on_render, &on_error);
        });
    }
}

/// Drain controller events and hand them to the page
fn notify(
    inner: &Shared<PlaybackController>,
    on_render: &Shared<Option<Function>>,
    on_error: &Shared<Option<Function>>,
) {
    let events = inner.borrow_mut().drain_events();
    if events.is_empty() {
        return;
    }

    if let Some(ref cb) = *on_error.borrow() {
        for event in &events {
            if let crate::PlayerEvent::Error { message } = event {
                cb.call1(&JsValue::NULL, &JsValue::from_str(message)).ok();
            }
        }
    }

    if let Some(ref cb) = *on_render.borrow() {
        if let Ok(js_events) = serde_wasm_bindgen::to_value(&events) {
            cb.call1(&JsValue::NULL, &js_events).ok();
        }
    }
}
