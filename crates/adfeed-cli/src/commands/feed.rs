//! Feed command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use adfeed_feed::{FeedController, FeedOptions};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Stop after this many pages
    #[arg(long, default_value_t = 3)]
    pub pages: u32,

    /// Rows before the end of the list that trigger the next page
    #[arg(long, default_value_t = 0)]
    pub prefetch_distance: usize,

    /// Output ads as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: FeedArgs, settings: &Settings) -> Result<()> {
    let feed = FeedController::with_options(
        super::repository(settings)?,
        FeedOptions {
            page_size: settings.page_size,
            prefetch_distance: args.prefetch_distance,
        },
    );

    let mut updates = feed.subscribe();
    let watcher = tokio::spawn(async move {
        let mut phase = updates.borrow_and_update().phase();
        while updates.changed().await.is_ok() {
            let next = updates.borrow_and_update().phase();
            if next != phase {
                debug!(?phase, ?next, "Feed phase changed");
                phase = next;
            }
        }
    });

    feed.fetch_ads(true).await.context("Feed task failed")?;

    let mut pages = 1;
    let mut printed = 0;
    loop {
        let state = feed.state();
        for ad in &state.ads[printed..] {
            if args.json {
                output::json(ad)?;
            } else {
                output::ad_row(ad);
            }
        }
        printed = state.ads.len();

        if let Some(message) = &state.error_message {
            if state.ads.is_empty() {
                bail!("Failed to fetch ads: {message}");
            }
            output::error(message);
            break;
        }

        if pages >= args.pages || !state.has_more() {
            if !args.json {
                output::next_cursor(state.pagination.as_ref().and_then(|p| p.after.as_deref()));
            }
            break;
        }

        // Pretend the last printed row scrolled into view.
        let Some(task) = feed.load_more_if_near_end(printed.saturating_sub(1)) else {
            break;
        };
        task.await.context("Feed task failed")?;
        pages += 1;
    }

    if !args.json {
        output::success(&format!("{printed} ads in {pages} pages"));
    }

    drop(feed);
    let _ = watcher.await;
    Ok(())
}
