//! Subcommand implementations.

pub mod config;
pub mod detail;
pub mod feed;
pub mod page;

use std::sync::Arc;

use anyhow::{Context, Result};

use adfeed_data::{AdMapper, DefaultAdRepository};
use adfeed_http::RemoteAdDataSource;

use crate::cli::{ApiArgs, Commands};
use crate::config::Settings;

pub async fn handle(command: Commands, api: &ApiArgs) -> Result<()> {
    let settings = Settings::load(api).context("Failed to load configuration")?;
    tracing::debug!(base_url = %settings.base_url, "Resolved settings");

    match command {
        Commands::Page(args) => page::run(args, &settings).await,
        Commands::Feed(args) => feed::run(args, &settings).await,
        Commands::Detail(args) => detail::run(args, &settings).await,
        Commands::Config(args) => config::run(args, &settings),
    }
}

/// Repository over the configured deployment.
fn repository(settings: &Settings) -> Result<Arc<DefaultAdRepository<RemoteAdDataSource>>> {
    let config = settings.api_config();
    let source = RemoteAdDataSource::new(config.clone()).context("Failed to create HTTP client")?;
    Ok(Arc::new(DefaultAdRepository::new(
        source,
        AdMapper::new(config),
    )))
}
