//! Task plumbing shared by the controllers.

use tokio::sync::watch;

/// Broadcasts controller shutdown to its in-flight tasks.
#[derive(Debug)]
pub(crate) struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub(crate) fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub(crate) fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }
}

/// Resolves once shutdown has been triggered.
#[derive(Debug)]
pub(crate) struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    pub(crate) async fn triggered(&mut self) {
        // A dropped sender counts as shutdown too.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

/// Runs a completion callback exactly once, when dropped.
pub(crate) struct CompletionGuard(Option<Box<dyn FnOnce() + Send + 'static>>);

impl CompletionGuard {
    pub(crate) fn new(callback: Option<Box<dyn FnOnce() + Send + 'static>>) -> Self {
        Self(callback)
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(callback) = self.0.take() {
            callback();
        }
    }
}
