//! Sequential image loader.
//!
//! Fetches a batch of image URLs one at a time and appends each decoded image
//! to the gallery in the order the URLs were given. Only one request is ever
//! in flight, which is what keeps the gallery order stable.
//!
//! A batch requested while another is loading is staged; the in-flight request
//! is cancelled and the staged batch takes over once that cancellation
//! settles. Events from any request other than the active one are ignored, so
//! a superseded fetch can never append to the new batch.

use std::collections::VecDeque;

use tracing::debug;

use crate::gallery::GalleryView;
use crate::http::{HttpClient, RequestEvent, RequestId, RequestState};
use crate::image_loader::{ImageDecoder, RasterDecoder};

type FinishCallback = Box<dyn FnOnce()>;

#[derive(Debug)]
struct ActiveRequest {
    id: RequestId,
    url: String,
    cancel_requested: bool,
}

pub struct SequentialImageLoader {
    decoder: Box<dyn ImageDecoder>,
    pending: VecDeque<String>,
    active: Option<ActiveRequest>,
    next_batch: Option<Vec<String>>,
    loading: bool,
    finish_callback: Option<FinishCallback>,
}

impl Default for SequentialImageLoader {
    fn default() -> Self {
        Self::new(Box::new(RasterDecoder::default()))
    }
}

impl SequentialImageLoader {
    pub fn new(decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            decoder,
            pending: VecDeque::new(),
            active: None,
            next_batch: None,
            loading: false,
            finish_callback: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.loading
    }

    /// Whether `id` is the request this loader is waiting on.
    pub fn owns(&self, id: RequestId) -> bool {
        self.active.as_ref().is_some_and(|a| a.id == id)
    }

    /// URLs still queued behind the active request.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn active_url(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.url.as_str())
    }

    pub fn has_staged_batch(&self) -> bool {
        self.next_batch.is_some()
    }

    /// Start loading `urls` into `gallery`, or stage them if a batch is
    /// already loading. The last staged batch wins.
    pub fn load<C: HttpClient + ?Sized>(
        &mut self,
        urls: Vec<String>,
        client: &mut C,
        gallery: &mut GalleryView,
    ) {
        debug!("Loading {} image(s)", urls.len());

        if self.loading {
            debug!("    Busy, staging batch and cancelling the current request");
            self.next_batch = Some(urls);
            self.cancel_active(client);
            return;
        }

        debug!("    Replacing URLs and starting popping");
        gallery.reset_images();
        self.pending = urls.into();
        self.loading = true;
        self.load_next(client);
    }

    /// Feed a request state change. Returns `false` if the event belongs to
    /// some other request.
    pub fn on_request_event<C: HttpClient + ?Sized>(
        &mut self,
        event: &RequestEvent,
        client: &mut C,
        gallery: &mut GalleryView,
    ) -> bool {
        if !self.owns(event.id) {
            debug!(" -- Ignoring state <{}> of stale request {}", event.state, event.id);
            return false;
        }
        if !event.state.is_terminal() {
            return true;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        if event.state == RequestState::Completed
            && self.next_batch.is_none()
            && !active.cancel_requested
        {
            self.append_image(event, gallery);
        }

        if let Some(batch) = self.next_batch.take() {
            debug!(" -- Request state <{}>, switching to staged batch", event.state);
            self.loading = false;
            self.pending.clear();
            self.load(batch, client, gallery);
        } else if !self.pending.is_empty() {
            debug!(" -- Request state <{}> and more URLs to load. Loading next.", event.state);
            self.load_next(client);
        } else {
            debug!(" -- Request state <{}> and no more URLs to load. Finishing.", event.state);
            self.finish();
        }
        true
    }

    /// Drop everything queued and cancel the in-flight request. `done` runs
    /// once the loader is idle: right away if nothing is in flight, otherwise
    /// after the cancellation settles.
    pub fn cancel_all<C: HttpClient + ?Sized>(
        &mut self,
        done: impl FnOnce() + 'static,
        client: &mut C,
    ) {
        if self.active.is_none() {
            done();
            return;
        }

        debug!("Cancelling all image requests");
        self.pending.clear();
        self.next_batch = None;
        // Keep an earlier waiter so it still fires exactly once
        self.finish_callback = Some(match self.finish_callback.take() {
            Some(earlier) => Box::new(move || {
                earlier();
                done();
            }),
            None => Box::new(done),
        });
        self.cancel_active(client);
    }

    fn load_next<C: HttpClient + ?Sized>(&mut self, client: &mut C) {
        let Some(url) = self.pending.pop_front() else {
            self.finish();
            return;
        };
        let id = client.start(&url);
        self.active = Some(ActiveRequest {
            id,
            url,
            cancel_requested: false,
        });
    }

    fn cancel_active<C: HttpClient + ?Sized>(&mut self, client: &mut C) {
        if let Some(active) = self.active.as_mut() {
            if !active.cancel_requested {
                active.cancel_requested = true;
                client.cancel(active.id);
            }
        }
    }

    fn append_image(&self, event: &RequestEvent, gallery: &mut GalleryView) {
        let Some(response) = event.response.as_ref() else {
            return;
        };
        match self.decoder.decode(response.as_bytes()) {
            Ok(image) => {
                debug!(" -- Request finished. Adding image: {}", response.url);
                gallery.push_image(image);
            }
            Err(e) => debug!(" -- Skipping {}: {e}", response.url),
        }
    }

    fn finish(&mut self) {
        self.loading = false;
        self.pending.clear();
        if let Some(done) = self.finish_callback.take() {
            done();
        }
    }
}
