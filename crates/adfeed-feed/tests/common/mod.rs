#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use adfeed_core::error::TransportError;
use adfeed_core::{Ad, AdRepository, AdResponse, Pagination, Result, Subscription};
use adfeed_feed::Completion;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

const WAIT: Duration = Duration::from_secs(2);

/// A page request parked until the test answers it.
#[derive(Debug)]
pub struct PageRequest {
    pub limit: u32,
    pub after: Option<String>,
    pub before: Option<String>,
    reply: oneshot::Sender<Result<AdResponse>>,
}

impl PageRequest {
    /// Answer the request. Ignored if the caller gave up on it.
    pub fn respond(self, result: Result<AdResponse>) {
        let _ = self.reply.send(result);
    }
}

/// A detail request parked until the test answers it.
#[derive(Debug)]
pub struct DetailRequest {
    pub id: String,
    reply: oneshot::Sender<Result<Ad>>,
}

impl DetailRequest {
    pub fn respond(self, result: Result<Ad>) {
        let _ = self.reply.send(result);
    }

    /// Returns true once the caller dropped the request.
    pub fn is_abandoned(&self) -> bool {
        self.reply.is_closed()
    }
}

/// Repository whose every call blocks until the test responds.
pub struct GatedRepository {
    pages: mpsc::UnboundedSender<PageRequest>,
    details: mpsc::UnboundedSender<DetailRequest>,
}

/// Test side of a [`GatedRepository`].
pub struct Gates {
    pages: mpsc::UnboundedReceiver<PageRequest>,
    details: mpsc::UnboundedReceiver<DetailRequest>,
}

pub fn gated() -> (Arc<GatedRepository>, Gates) {
    let (pages_tx, pages_rx) = mpsc::unbounded_channel();
    let (details_tx, details_rx) = mpsc::unbounded_channel();
    let repository = GatedRepository {
        pages: pages_tx,
        details: details_tx,
    };
    let gates = Gates {
        pages: pages_rx,
        details: details_rx,
    };
    (Arc::new(repository), gates)
}

impl Gates {
    /// Wait for the next page request.
    pub async fn next_page(&mut self) -> PageRequest {
        tokio::time::timeout(WAIT, self.pages.recv())
            .await
            .expect("timed out waiting for a page request")
            .expect("repository dropped")
    }

    /// Wait for the next detail request.
    pub async fn next_detail(&mut self) -> DetailRequest {
        tokio::time::timeout(WAIT, self.details.recv())
            .await
            .expect("timed out waiting for a detail request")
            .expect("repository dropped")
    }

    /// Returns true if no page request is waiting.
    pub fn no_page_requested(&mut self) -> bool {
        self.pages.try_recv().is_err()
    }
}

async fn request_detail(details: &mpsc::UnboundedSender<DetailRequest>, id: String) -> Result<Ad> {
    let (reply, rx) = oneshot::channel();
    if details.send(DetailRequest { id, reply }).is_err() {
        return Err(TransportError::Cancelled.into());
    }
    rx.await
        .unwrap_or_else(|_| Err(TransportError::Cancelled.into()))
}

#[async_trait]
impl AdRepository for GatedRepository {
    async fn fetch_ads(
        &self,
        limit: u32,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<AdResponse> {
        let (reply, rx) = oneshot::channel();
        let request = PageRequest {
            limit,
            after: after.map(str::to_string),
            before: before.map(str::to_string),
            reply,
        };
        if self.pages.send(request).is_err() {
            return Err(TransportError::Cancelled.into());
        }
        rx.await
            .unwrap_or_else(|_| Err(TransportError::Cancelled.into()))
    }

    async fn fetch_ad_detail(&self, id: &str) -> Result<Ad> {
        request_detail(&self.details, id.to_string()).await
    }

    fn subscribe_ad_detail(&self, id: &str) -> Subscription<Ad> {
        let details = self.details.clone();
        let id = id.to_string();
        Subscription::spawn(async move { request_detail(&details, id).await })
    }
}

pub fn ad(id: &str) -> Ad {
    Ad {
        id: id.to_string(),
        title: format!("title {id}"),
        description: String::new(),
        picture_thumb: None,
        picture_large: None,
        time: 5,
        distance: 1.0,
    }
}

/// A page of ads with the given `after` cursor.
pub fn page(ids: &[&str], after: Option<&str>) -> AdResponse {
    AdResponse {
        data: ids.iter().map(|id| ad(id)).collect(),
        paging: Pagination {
            after: after.map(str::to_string),
            before: None,
            page_length: ids.len() as u32,
        },
    }
}

pub fn ids(ads: &[Ad]) -> Vec<&str> {
    ads.iter().map(|ad| ad.id.as_str()).collect()
}

/// A completion that bumps `count`.
pub fn counting(count: &Arc<AtomicUsize>) -> Completion {
    let count = Arc::clone(count);
    Box::new(move || {
        count.fetch_add(1, Ordering::SeqCst);
    })
}
