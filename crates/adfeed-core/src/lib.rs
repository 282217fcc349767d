//! adfeed-core - Core types and traits for the classified-ad feed engine.
//!
//! Domain entities, wire records, the data source and repository contracts,
//! and the single-value [`Subscription`] shared by every layer.

pub mod ad;
pub mod config;
pub mod dto;
pub mod error;
pub mod subscription;
pub mod traits;
pub mod types;

pub use ad::{Ad, AdResponse, Pagination, TravelEstimate};
pub use config::{ApiConfig, Environment, ImageSize};
pub use error::Error;
pub use subscription::Subscription;
pub use traits::{AdDataSource, AdRepository};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
