//! Cancellable single-value subscriptions.
//!
//! A [`Subscription`] is the push-style twin of an `async fn`: it runs the
//! same request future on a spawned task and yields exactly one item, either
//! the value or the failure. Cancelling it, or dropping it, aborts the task
//! and with it the in-flight request.
//!
//! # Example
//!
//! ```
//! use adfeed_core::Subscription;
//! use futures_util::StreamExt;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut sub = Subscription::spawn(async { Ok::<_, adfeed_core::Error>(21) }).map(|n| n * 2);
//! assert_eq!(sub.next().await.unwrap().unwrap(), 42);
//! assert!(sub.next().await.is_none());
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::trace;

use crate::Result;
use crate::error::TransportError;

/// A stream that delivers one value or one failure, then ends.
pub struct Subscription<T> {
    inner: Pin<Box<dyn Stream<Item = Result<T>> + Send>>,
    guard: AbortOnDrop,
}

impl<T: Send + 'static> Subscription<T> {
    /// Run `fut` on the current tokio runtime and deliver its output.
    ///
    /// Must be called from within a runtime.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });

        let stream = async_stream::stream! {
            match rx.await {
                Ok(result) => yield result,
                Err(_) => yield Err(TransportError::Cancelled.into()),
            }
        };

        Self {
            inner: Box::pin(stream),
            guard: AbortOnDrop(handle.abort_handle()),
        }
    }

    /// Transform the delivered value, keeping the cancellation link.
    pub fn map<U, F>(self, f: F) -> Subscription<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let mut inner = self.inner;
        let stream = async_stream::stream! {
            if let Some(item) = inner.next().await {
                yield item.map(f);
            }
        };

        Subscription {
            inner: Box::pin(stream),
            guard: self.guard,
        }
    }

    /// Wait for the single item.
    ///
    /// Resolves to a cancellation error if the subscription was cancelled
    /// before it delivered.
    pub async fn value(mut self) -> Result<T> {
        match self.next().await {
            Some(result) => result,
            None => Err(TransportError::Cancelled.into()),
        }
    }
}

impl<T> Subscription<T> {
    /// Abort the underlying request. Idempotent.
    pub fn cancel(&self) {
        trace!("cancelling subscription");
        self.guard.0.abort();
    }

    /// Returns true once the underlying task has completed or been aborted.
    pub fn is_finished(&self) -> bool {
        self.guard.0.is_finished()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("finished", &self.guard.0.is_finished())
            .finish()
    }
}

struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
