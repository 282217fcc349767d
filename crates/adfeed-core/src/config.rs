//! API endpoints, environments and image sizing.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};
use crate::types::BaseUrl;

/// Path of the geo search listing endpoint.
pub const ADS_PATH: &[&str] = &["v2", "search", "items", "geo"];

/// Path prefix of the article detail endpoint; the ad id is appended.
pub const AD_DETAIL_PATH: &[&str] = &["v1", "api", "v0.19", "articles"];

/// A deployment of the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Prod,
    Staging,
}

impl Environment {
    /// Base URL of the listing and detail API.
    pub fn endpoint_base_url(self) -> &'static str {
        match self {
            Environment::Prod => "https://prod.geev.fr",
            Environment::Staging => "https://stage.geev.fr",
        }
    }

    /// Base URL of the image host.
    pub fn image_base_url(self) -> &'static str {
        match self {
            Environment::Prod => "https://images.geev.fr",
            Environment::Staging => "https://stage-images.geev.fr",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Prod => f.write_str("prod"),
            Environment::Staging => f.write_str("staging"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Environment::Prod),
            "staging" | "stage" => Ok(Environment::Staging),
            _ => Err(InvalidInputError::Environment {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Display sizes an ad picture is resolved at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Card thumbnail in the listing.
    Thumbnail,
    /// Full-width picture on the detail screen.
    Large,
}

impl ImageSize {
    /// Square edge in pixels used when synthesizing an URL from a picture id.
    pub fn pixels(self) -> u32 {
        match self {
            ImageSize::Thumbnail => 125,
            ImageSize::Large => 600,
        }
    }
}

/// Where requests and pictures are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: BaseUrl,
    image_base_url: BaseUrl,
    timeout: Option<Duration>,
}

impl ApiConfig {
    /// Create a configuration from explicit base URLs.
    pub fn new(base_url: BaseUrl, image_base_url: BaseUrl) -> Self {
        Self {
            base_url,
            image_base_url,
            timeout: None,
        }
    }

    /// Configuration of a known deployment.
    pub fn for_environment(environment: Environment) -> Result<Self, Error> {
        Ok(Self::new(
            BaseUrl::new(environment.endpoint_base_url())?,
            BaseUrl::new(environment.image_base_url())?,
        ))
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn image_base_url(&self) -> &BaseUrl {
        &self.image_base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// URL of the listing endpoint.
    pub fn ads_url(&self) -> String {
        self.base_url.endpoint(ADS_PATH)
    }

    /// URL of the detail endpoint for one ad.
    pub fn ad_detail_url(&self, id: &str) -> String {
        let mut segments = AD_DETAIL_PATH.to_vec();
        segments.push(id);
        self.base_url.endpoint(&segments)
    }

    /// URL of a picture identified only by its id.
    pub fn picture_url(&self, id: &str, size: ImageSize) -> String {
        format!("{}/{}/squares/{}", self.image_base_url, id, size.pixels())
    }
}
