//! Wire record to domain entity mapping.

use std::sync::Arc;

use adfeed_core::dto::{AdDto, PaginationDto, PictureDto};
use adfeed_core::{Ad, ApiConfig, ImageSize, Pagination};

use crate::travel::{RandomTravelEstimator, TravelEstimator};

/// Turns [`AdDto`] records into [`Ad`] entities.
///
/// Mapping cannot fail: anything malformed was already rejected while
/// decoding the payload.
#[derive(Clone)]
pub struct AdMapper {
    config: Arc<ApiConfig>,
    estimator: Arc<dyn TravelEstimator>,
}

impl AdMapper {
    /// Create a mapper with random travel estimates.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_estimator(config, Arc::new(RandomTravelEstimator))
    }

    /// Create a mapper with a custom travel estimator.
    pub fn with_estimator(config: ApiConfig, estimator: Arc<dyn TravelEstimator>) -> Self {
        Self {
            config: Arc::new(config),
            estimator,
        }
    }

    /// Map one record.
    pub fn map(&self, dto: AdDto) -> Ad {
        let picture_thumb = self.resolve_picture(&dto.pictures, ImageSize::Thumbnail);
        let picture_large = self.resolve_picture(&dto.pictures, ImageSize::Large);
        let estimate = self.estimator.estimate(&dto.id);

        Ad {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            picture_thumb,
            picture_large,
            time: estimate.minutes,
            distance: estimate.distance_km,
        }
    }

    /// Map records element-wise, keeping their order.
    pub fn map_all(&self, dtos: Vec<AdDto>) -> Vec<Ad> {
        dtos.into_iter().map(|dto| self.map(dto)).collect()
    }

    /// Rebuild the domain cursor.
    pub fn map_pagination(dto: PaginationDto) -> Pagination {
        Pagination {
            after: dto.after,
            before: dto.before,
            page_length: dto.page_length,
        }
    }

    /// First picture, in list order, that yields an URL at `size`.
    fn resolve_picture(&self, pictures: &[PictureDto], size: ImageSize) -> Option<String> {
        pictures.iter().find_map(|picture| match picture {
            PictureDto::Urls(urls) => urls.url_for(size).map(str::to_string),
            PictureDto::Id(id) => Some(self.config.picture_url(id, size)),
        })
    }
}

impl std::fmt::Debug for AdMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdMapper")
            .field("image_base_url", self.config.image_base_url())
            .finish_non_exhaustive()
    }
}
