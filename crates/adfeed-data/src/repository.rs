//! Repository backed by an [`AdDataSource`].

use async_trait::async_trait;
use tracing::{debug, instrument};

use adfeed_core::{Ad, AdDataSource, AdRepository, AdResponse, Result, Subscription};

use crate::mapper::AdMapper;

/// Stateless pass-through from a data source to domain entities.
#[derive(Debug, Clone)]
pub struct DefaultAdRepository<D> {
    source: D,
    mapper: AdMapper,
}

impl<D: AdDataSource> DefaultAdRepository<D> {
    /// Create a repository over `source`.
    pub fn new(source: D, mapper: AdMapper) -> Self {
        Self { source, mapper }
    }

    /// Returns the underlying data source.
    pub fn source(&self) -> &D {
        &self.source
    }
}

#[async_trait]
impl<D: AdDataSource> AdRepository for DefaultAdRepository<D> {
    #[instrument(skip(self))]
    async fn fetch_ads(
        &self,
        limit: u32,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<AdResponse> {
        let page = self.source.fetch_page(limit, after, before).await?;
        let data = self.mapper.map_all(page.data);
        let paging = AdMapper::map_pagination(page.paging);

        debug!(count = data.len(), "Mapped ad page");
        Ok(AdResponse { data, paging })
    }

    #[instrument(skip(self))]
    async fn fetch_ad_detail(&self, id: &str) -> Result<Ad> {
        let dto = self.source.fetch_detail(id).await?;
        Ok(self.mapper.map(dto))
    }

    fn subscribe_ad_detail(&self, id: &str) -> Subscription<Ad> {
        let mapper = self.mapper.clone();
        self.source
            .subscribe_detail(id)
            .map(move |dto| mapper.map(dto))
    }
}
