//! Single ad detail controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{Instrument, debug, instrument};

use adfeed_core::{Ad, AdRepository, Result};

use crate::task::Shutdown;

/// Snapshot of a detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    /// Last successfully loaded ad.
    pub ad: Option<Ad>,
    /// A load is in flight.
    pub is_loading: bool,
    /// Message of the last failed load, cleared when a load starts.
    pub error_message: Option<String>,
}

/// What a detail view should render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailDisplay<'a> {
    /// Loaded content. Shown even while a refresh is in flight or failed.
    Ad(&'a Ad),
    /// First load still in flight.
    Loading,
    /// First load failed with this message.
    Failed(&'a str),
    /// Nothing loaded and nothing pending.
    Empty,
}

impl DetailState {
    /// Pick what to render. An error only replaces content that never loaded.
    pub fn display(&self) -> DetailDisplay<'_> {
        if let Some(ad) = &self.ad {
            DetailDisplay::Ad(ad)
        } else if self.is_loading {
            DetailDisplay::Loading
        } else if let Some(message) = &self.error_message {
            DetailDisplay::Failed(message)
        } else {
            DetailDisplay::Empty
        }
    }
}

/// Loads one ad, either awaited or through a subscription.
///
/// Both styles feed the same [`DetailState`]. Only the most recently started
/// load may change it; starting a load also cancels a previous subscription.
pub struct DetailController {
    inner: Arc<Inner>,
}

struct Inner {
    repository: Arc<dyn AdRepository>,
    ad_id: String,
    state: watch::Sender<DetailState>,
    generation: AtomicU64,
    streamed: Mutex<Option<AbortHandle>>,
    shutdown: Shutdown,
}

impl DetailController {
    /// Create an idle controller for `ad_id`. Nothing is requested until a fetch.
    pub fn new(repository: Arc<dyn AdRepository>, ad_id: impl Into<String>) -> Self {
        let (state, _rx) = watch::channel(DetailState::default());
        Self {
            inner: Arc::new(Inner {
                repository,
                ad_id: ad_id.into(),
                state,
                generation: AtomicU64::new(0),
                streamed: Mutex::new(None),
                shutdown: Shutdown::new(),
            }),
        }
    }

    /// Id of the ad this controller loads.
    pub fn ad_id(&self) -> &str {
        &self.inner.ad_id
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> DetailState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.inner.state.subscribe()
    }

    /// Load the ad with the awaited accessor.
    #[instrument(skip(self), fields(id = %self.inner.ad_id))]
    pub fn fetch_ad(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let generation = inner.begin();
        let mut shutdown = inner.shutdown.listener();

        let task = async move {
            let result = tokio::select! {
                _ = shutdown.triggered() => return,
                result = inner.repository.fetch_ad_detail(&inner.ad_id) => result,
            };
            inner.apply(generation, result);
        };

        tokio::spawn(task.in_current_span())
    }

    /// Load the ad through a subscription.
    ///
    /// The subscription lives on the returned task; aborting the task, or
    /// starting another load, cancels the request.
    #[instrument(skip(self), fields(id = %self.inner.ad_id))]
    pub fn fetch_ad_streamed(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let generation = inner.begin();
        let subscription = inner.repository.subscribe_ad_detail(&inner.ad_id);
        let mut shutdown = inner.shutdown.listener();

        let task_inner = Arc::clone(&inner);
        let task = async move {
            let result = tokio::select! {
                _ = shutdown.triggered() => return,
                result = subscription.value() => result,
            };
            task_inner.apply(generation, result);
        };

        let handle = tokio::spawn(task.in_current_span());
        *inner.streamed.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(handle.abort_handle());
        handle
    }

    /// Abandon in-flight loads.
    pub fn shutdown(&self) {
        debug!(id = %self.inner.ad_id, "Shutting down detail controller");
        self.inner.shutdown.trigger();
        self.inner.cancel_streamed();
    }
}

impl Inner {
    /// Start a load: supersede earlier ones and flag loading.
    fn begin(&self) -> u64 {
        self.cancel_streamed();

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
            state.error_message = None;
        });
        generation
    }

    fn cancel_streamed(&self) {
        let previous = self
            .streamed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = previous {
            debug!("Cancelling previous subscription");
            handle.abort();
        }
    }

    fn apply(&self, generation: u64, result: Result<Ad>) {
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(ad) => {
                    state.ad = Some(ad);
                    state.error_message = None;
                }
                Err(err) => {
                    debug!(error = %err, "Detail load failed");
                    state.error_message = Some(err.to_string());
                }
            }
            state.is_loading = false;
            true
        });

        if !applied {
            debug!(generation, "Dropping superseded detail");
        }
    }
}

impl Drop for DetailController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for DetailController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailController")
            .field("ad_id", &self.inner.ad_id)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}
