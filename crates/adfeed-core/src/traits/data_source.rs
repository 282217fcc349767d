//! Remote data source trait.

use async_trait::async_trait;

use crate::dto::{AdDto, AdPageDto};
use crate::{Result, Subscription};

/// Issues the remote listing and detail calls and returns wire records.
///
/// The geo filter sent with listing requests is fixed by the product and is
/// not part of this contract.
#[async_trait]
pub trait AdDataSource: Send + Sync {
    /// Fetch one page of the listing.
    async fn fetch_page(
        &self,
        limit: u32,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<AdPageDto>;

    /// Fetch a single ad by id.
    async fn fetch_detail(&self, id: &str) -> Result<AdDto>;

    /// Push-style twin of [`fetch_detail`](Self::fetch_detail).
    ///
    /// Implementations must run the same request as `fetch_detail`, and
    /// cancelling the subscription must abort it.
    fn subscribe_detail(&self, id: &str) -> Subscription<AdDto>;
}
