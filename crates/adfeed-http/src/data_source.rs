//! Network-backed ad data source.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use adfeed_core::dto::{AdDto, AdPageDto};
use adfeed_core::{AdDataSource, ApiConfig, Result, Subscription};

use crate::client::AdClient;
use crate::endpoints::{DONATION_SEARCH, ListAdsQuery};

/// Fetches ads from the remote API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RemoteAdDataSource {
    config: Arc<ApiConfig>,
    client: AdClient,
}

impl RemoteAdDataSource {
    /// Create a data source for the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = AdClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Returns the configuration this source talks to.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl AdDataSource for RemoteAdDataSource {
    #[instrument(skip(self))]
    async fn fetch_page(
        &self,
        limit: u32,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<AdPageDto> {
        let query = ListAdsQuery {
            limit,
            after,
            before,
        };

        let page: AdPageDto = self
            .client
            .post(&self.config.ads_url(), &query, &DONATION_SEARCH)
            .await?;

        debug!(
            count = page.data.len(),
            has_next = page.paging.after.is_some(),
            "Fetched ad page"
        );
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn fetch_detail(&self, id: &str) -> Result<AdDto> {
        debug!("Fetching ad detail");
        self.client.get(&self.config.ad_detail_url(id)).await
    }

    fn subscribe_detail(&self, id: &str) -> Subscription<AdDto> {
        let source = self.clone();
        let id = id.to_string();
        Subscription::spawn(async move { source.fetch_detail(&id).await })
    }
}
