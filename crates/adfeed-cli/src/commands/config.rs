//! Config command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::{self, Settings};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print the default config file location
    #[arg(long)]
    pub path: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs, settings: &Settings) -> Result<()> {
    if args.path {
        println!("{}", config::default_path()?.display());
        return Ok(());
    }

    if args.json {
        return output::json_pretty(settings);
    }

    output::field("environment", &settings.environment.to_string());
    output::field("base_url", &settings.base_url.to_string());
    output::field("image_base_url", &settings.image_base_url.to_string());
    output::field(
        "timeout",
        &settings
            .timeout_secs
            .map_or_else(|| "none".to_string(), |secs| format!("{secs}s")),
    );
    output::field("page_size", &settings.page_size.to_string());
    output::field(
        "config_file",
        &settings
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |path| path.display().to_string()),
    );

    Ok(())
}
