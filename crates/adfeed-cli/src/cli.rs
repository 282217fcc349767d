//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use adfeed_core::{BaseUrl, Environment};

use crate::commands::{config, detail, feed, page};

/// Browse the classified ads feed.
#[derive(Parser, Debug)]
#[command(name = "adfeed")]
#[command(author, version = env!("ADFEED_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options selecting and tuning the API deployment.
///
/// Each one overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// Config file (defaults to config.json in the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Deployment to talk to (prod, staging)
    #[arg(long = "env", global = true, env = "ADFEED_ENV")]
    pub environment: Option<Environment>,

    /// API base URL, overriding the deployment's
    #[arg(long, global = true, env = "ADFEED_BASE_URL")]
    pub base_url: Option<BaseUrl>,

    /// Image base URL, overriding the deployment's
    #[arg(long, global = true, env = "ADFEED_IMAGE_BASE_URL")]
    pub image_base_url: Option<BaseUrl>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Ads requested per page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single page of ads
    Page(page::PageArgs),

    /// Walk the feed page by page
    Feed(feed::FeedArgs),

    /// Show one ad
    Detail(detail::DetailArgs),

    /// Show the resolved configuration
    Config(config::ConfigArgs),
}
