//! Paginated feed controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, instrument, trace};

use adfeed_core::{Ad, AdRepository, Pagination};

use crate::task::{CompletionGuard, Shutdown};

/// Ads requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 26;

/// Callback run once a [`FeedController::fetch_next_ads`] call settles.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Tuning knobs for a [`FeedController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// Value sent as `limit` on every page request.
    pub page_size: u32,
    /// How many items before the end of the list a prefetch is triggered.
    /// Zero means only the last item triggers it.
    pub prefetch_distance: usize,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_distance: 0,
        }
    }
}

/// Snapshot of the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Ads accumulated across pages, in server order.
    pub ads: Vec<Ad>,
    /// Cursor from the most recent successful page.
    pub pagination: Option<Pagination>,
    /// A first page (or refresh) is in flight.
    pub is_loading: bool,
    /// A next page is in flight.
    pub is_loading_more: bool,
    /// Message of the most recent failure, cleared when a fetch starts.
    pub error_message: Option<String>,
}

/// Coarse lifecycle of the feed, derived from [`FeedState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing fetched yet.
    Idle,
    /// First page or refresh in flight.
    InitialLoading,
    /// Content available, nothing in flight.
    Loaded,
    /// Next page in flight.
    LoadingMore,
    /// The last fetch failed. Previously loaded ads are kept.
    Errored,
}

impl FeedState {
    /// Derive the lifecycle phase.
    pub fn phase(&self) -> FeedPhase {
        if self.is_loading {
            FeedPhase::InitialLoading
        } else if self.is_loading_more {
            FeedPhase::LoadingMore
        } else if self.error_message.is_some() {
            FeedPhase::Errored
        } else if self.ads.is_empty() && self.pagination.is_none() {
            FeedPhase::Idle
        } else {
            FeedPhase::Loaded
        }
    }

    /// Returns true if the server reported a next page.
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(Pagination::has_next)
    }
}

/// Owns the feed state and folds fetched pages into it.
///
/// Every state transition goes through the watch channel's write lock, so a
/// transition (flags, ads, cursor and error together) is observed whole or
/// not at all. Work started before a reset is dropped when it completes.
///
/// Dropping the controller shuts it down.
pub struct FeedController {
    inner: Arc<Inner>,
}

struct Inner {
    repository: Arc<dyn AdRepository>,
    options: FeedOptions,
    state: watch::Sender<FeedState>,
    epoch: AtomicU64,
    shutdown: Shutdown,
}

impl FeedController {
    /// Create a controller with default options.
    pub fn new(repository: Arc<dyn AdRepository>) -> Self {
        Self::with_options(repository, FeedOptions::default())
    }

    /// Create a controller with custom options.
    pub fn with_options(repository: Arc<dyn AdRepository>, options: FeedOptions) -> Self {
        let (state, _rx) = watch::channel(FeedState::default());
        Self {
            inner: Arc::new(Inner {
                repository,
                options,
                state,
                epoch: AtomicU64::new(0),
                shutdown: Shutdown::new(),
            }),
        }
    }

    /// Returns the options this controller was built with.
    pub fn options(&self) -> FeedOptions {
        self.inner.options
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    /// Fetch a page.
    ///
    /// With `reset` the feed is cleared and the first page requested; work
    /// still in flight from before is dropped when it lands. Without it the
    /// page after the current cursor is requested and appended.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn fetch_ads(&self, reset: bool) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let mut epoch = 0;
        let mut after = None;

        inner.state.send_modify(|state| {
            if reset {
                epoch = inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
                state.ads.clear();
                state.pagination = None;
                state.is_loading_more = false;
            } else {
                epoch = inner.epoch.load(Ordering::SeqCst);
                after = state.pagination.as_ref().and_then(|p| p.after.clone());
            }
            state.is_loading = true;
            state.error_message = None;
        });

        debug!(epoch, ?after, "Fetching ads");
        let mut shutdown = inner.shutdown.listener();

        let task = async move {
            let result = tokio::select! {
                _ = shutdown.triggered() => {
                    debug!("Controller shut down, abandoning fetch");
                    return;
                }
                result = inner
                    .repository
                    .fetch_ads(inner.options.page_size, after.as_deref(), None) => result,
            };

            let applied = inner.apply(epoch, |state| {
                match result {
                    Ok(response) => {
                        trace!(count = response.data.len(), "Applying page");
                        if reset {
                            state.ads = response.data;
                        } else {
                            state.ads.extend(response.data);
                        }
                        state.pagination = Some(response.paging);
                    }
                    Err(err) => {
                        debug!(error = %err, "Fetch failed");
                        state.error_message = Some(err.to_string());
                    }
                }
                state.is_loading = false;
            });

            if !applied {
                debug!(epoch, "Dropping stale page");
            }
        };

        tokio::spawn(task.in_current_span())
    }

    /// Fetch the page after the current cursor, if any.
    ///
    /// Does nothing when a next page is already in flight or the server
    /// reported no further page; `on_complete` then runs before this returns
    /// and `None` is returned. Otherwise `on_complete` runs exactly once
    /// after the fetch settles, whether it succeeded, failed, was made stale
    /// by a reset, or was abandoned on shutdown.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip_all)]
    pub fn fetch_next_ads(&self, on_complete: Option<Completion>) -> Option<JoinHandle<()>> {
        let completion = CompletionGuard::new(on_complete);
        let inner = Arc::clone(&self.inner);
        let mut request = None;

        inner.state.send_if_modified(|state| {
            if state.is_loading_more {
                return false;
            }
            let Some(after) = state.pagination.as_ref().and_then(|p| p.after.clone()) else {
                return false;
            };
            state.is_loading_more = true;
            state.error_message = None;
            request = Some((inner.epoch.load(Ordering::SeqCst), after));
            true
        });

        let Some((epoch, after)) = request else {
            trace!("No next page to fetch");
            drop(completion);
            return None;
        };

        debug!(epoch, after = %after, "Fetching next ads");
        let mut shutdown = inner.shutdown.listener();

        let task = async move {
            // Declared first so it runs after the state is applied.
            let _completion = completion;

            let result = tokio::select! {
                _ = shutdown.triggered() => {
                    debug!("Controller shut down, abandoning next page");
                    return;
                }
                result = inner
                    .repository
                    .fetch_ads(inner.options.page_size, Some(&after), None) => result,
            };

            let applied = inner.apply(epoch, |state| {
                match result {
                    Ok(response) => {
                        trace!(count = response.data.len(), "Appending page");
                        state.ads.extend(response.data);
                        state.pagination = Some(response.paging);
                    }
                    Err(err) => {
                        debug!(error = %err, "Next page failed");
                        state.error_message = Some(err.to_string());
                    }
                }
                state.is_loading_more = false;
            });

            if !applied {
                debug!(epoch, "Dropping stale next page");
            }
        };

        Some(tokio::spawn(task.in_current_span()))
    }

    /// Prefetch trigger for list consumers.
    ///
    /// Call with the index of an item that became visible. Starts a next
    /// page fetch when the index is within the prefetch distance of the end.
    pub fn load_more_if_near_end(&self, visible_index: usize) -> Option<JoinHandle<()>> {
        let len = self.inner.state.borrow().ads.len();
        let reach = visible_index
            .saturating_add(self.inner.options.prefetch_distance)
            .saturating_add(1);
        if len == 0 || reach < len {
            return None;
        }

        trace!(visible_index, len, "Near end of list");
        self.fetch_next_ads(None)
    }

    /// Abandon in-flight work. Later completions leave the state untouched.
    pub fn shutdown(&self) {
        debug!("Shutting down feed controller");
        self.inner.shutdown.trigger();
    }
}

impl Inner {
    /// Apply `f` if `epoch` is still current. Returns whether it ran.
    fn apply<F>(&self, epoch: u64, f: F) -> bool
    where
        F: FnOnce(&mut FeedState),
    {
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            f(state);
            applied = true;
            true
        });
        applied
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for FeedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedController")
            .field("options", &self.inner.options)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}
