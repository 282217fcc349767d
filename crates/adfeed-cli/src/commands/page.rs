//! Page command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use adfeed_core::AdRepository;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Cursor of the page to fetch
    #[arg(long)]
    pub after: Option<String>,

    /// Cursor to page backwards from
    #[arg(long)]
    pub before: Option<String>,

    /// Maximum number of ads (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output the page as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: PageArgs, settings: &Settings) -> Result<()> {
    let repository = super::repository(settings)?;
    let limit = args.limit.unwrap_or(settings.page_size);

    let page = repository
        .fetch_ads(limit, args.after.as_deref(), args.before.as_deref())
        .await
        .context("Failed to fetch ads")?;

    if args.pretty {
        return output::json_pretty(&page);
    }
    if args.json {
        return output::json(&page);
    }

    if page.data.is_empty() {
        eprintln!("{}", "No ads found.".dimmed());
    }
    for ad in &page.data {
        output::ad_row(ad);
    }
    output::next_cursor(page.paging.after.as_deref());

    Ok(())
}
