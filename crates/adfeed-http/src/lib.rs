//! adfeed-http - HTTP-backed ad data source.
//!
//! Talks to the listing and detail endpoints with reqwest and returns the
//! wire records from [`adfeed_core::dto`].

mod client;
mod data_source;
mod endpoints;

pub use client::AdClient;
pub use data_source::RemoteAdDataSource;
pub use endpoints::{DONATION_SEARCH, GeoSearchBody, ListAdsQuery};
