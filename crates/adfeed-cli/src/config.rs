//! Layered CLI configuration.
//!
//! Built-in defaults are overridden by the config file, which is overridden
//! by environment variables and flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use adfeed_core::{ApiConfig, BaseUrl, Environment};
use adfeed_feed::DEFAULT_PAGE_SIZE;

use crate::cli::ApiArgs;

/// Contents of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub environment: Option<Environment>,
    pub base_url: Option<BaseUrl>,
    pub image_base_url: Option<BaseUrl>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub environment: Environment,
    pub base_url: BaseUrl,
    pub image_base_url: BaseUrl,
    pub timeout_secs: Option<u64>,
    pub page_size: u32,
    /// File the settings were read from, if any.
    pub config_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings for a command line.
    pub fn load(args: &ApiArgs) -> Result<Self> {
        let (file, path) = match &args.config {
            Some(path) => (read_file(path)?, Some(path.clone())),
            None => {
                let path = default_path()?;
                if path.exists() {
                    (read_file(&path)?, Some(path))
                } else {
                    (FileConfig::default(), None)
                }
            }
        };

        let mut settings = Self::resolve(file, args)?;
        settings.config_file = path;
        Ok(settings)
    }

    /// Overlay `args` on `file` on the built-in defaults.
    pub fn resolve(file: FileConfig, args: &ApiArgs) -> Result<Self> {
        let environment = args
            .environment
            .or(file.environment)
            .unwrap_or_default();
        let defaults = ApiConfig::for_environment(environment)?;

        let base_url = args
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| defaults.base_url().clone());
        let image_base_url = args
            .image_base_url
            .clone()
            .or(file.image_base_url)
            .unwrap_or_else(|| defaults.image_base_url().clone());

        let page_size = args
            .page_size
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        anyhow::ensure!(page_size > 0, "Page size must be at least 1");

        Ok(Self {
            environment,
            base_url,
            image_base_url,
            timeout_secs: args.timeout.or(file.timeout_secs),
            page_size,
            config_file: None,
        })
    }

    /// API configuration for the data source.
    pub fn api_config(&self) -> ApiConfig {
        let config = ApiConfig::new(self.base_url.clone(), self.image_base_url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Default config file location.
pub fn default_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "adfeed").context("Could not determine config directory")?;

    Ok(dirs.config_dir().join("config.json"))
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}
