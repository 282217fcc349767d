//! adfeed-feed - Controllers that own the feed and detail state.
//!
//! Each controller publishes its state through a [`tokio::sync::watch`]
//! channel. Presentation code subscribes and reads snapshots; only the
//! controller writes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use adfeed_core::{ApiConfig, Environment};
//! use adfeed_data::{AdMapper, DefaultAdRepository};
//! use adfeed_feed::FeedController;
//! use adfeed_http::RemoteAdDataSource;
//!
//! # async fn example() -> Result<(), adfeed_core::Error> {
//! let config = ApiConfig::for_environment(Environment::Prod)?;
//! let source = RemoteAdDataSource::new(config.clone())?;
//! let repository = DefaultAdRepository::new(source, AdMapper::new(config));
//!
//! let feed = FeedController::new(Arc::new(repository));
//! feed.fetch_ads(true).await.ok();
//!
//! for ad in &feed.state().ads {
//!     println!("{}: {}", ad.id, ad.title);
//! }
//! # Ok(())
//! # }
//! ```

mod detail;
mod feed;
mod task;

pub use detail::{DetailController, DetailDisplay, DetailState};
pub use feed::{Completion, DEFAULT_PAGE_SIZE, FeedController, FeedOptions, FeedPhase, FeedState};
