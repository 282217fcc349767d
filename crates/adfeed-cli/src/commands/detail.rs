//! Detail command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use adfeed_feed::{DetailController, DetailDisplay};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Ad id
    pub id: String,

    /// Load through a subscription instead of awaiting the request
    #[arg(long)]
    pub stream: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: DetailArgs, settings: &Settings) -> Result<()> {
    let controller = DetailController::new(super::repository(settings)?, args.id);

    let task = if args.stream {
        controller.fetch_ad_streamed()
    } else {
        controller.fetch_ad()
    };
    task.await.context("Detail task failed")?;

    let state = controller.state();
    match state.display() {
        DetailDisplay::Ad(ad) if args.json => output::json_pretty(ad),
        DetailDisplay::Ad(ad) => {
            output::ad_detail(ad);
            Ok(())
        }
        DetailDisplay::Failed(message) => bail!("Failed to fetch ad: {message}"),
        DetailDisplay::Loading | DetailDisplay::Empty => bail!("No ad loaded"),
    }
}
