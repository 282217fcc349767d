//! Domain-facing repository trait.

use async_trait::async_trait;

use crate::{Ad, AdResponse, Result, Subscription};

/// The stable contract the controllers depend on.
///
/// Implementations hold no state and never cache: every call reaches the data
/// source, and its errors are returned unchanged in kind.
#[async_trait]
pub trait AdRepository: Send + Sync {
    /// Fetch one page of ads.
    async fn fetch_ads(
        &self,
        limit: u32,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<AdResponse>;

    /// Fetch a single ad.
    async fn fetch_ad_detail(&self, id: &str) -> Result<Ad>;

    /// Subscription-style twin of [`fetch_ad_detail`](Self::fetch_ad_detail).
    fn subscribe_ad_detail(&self, id: &str) -> Subscription<Ad>;
}
