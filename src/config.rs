//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file,
//! environment variables, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::cache;
use crate::cli::Args;
use crate::source::{NewsQuery, DEFAULT_BASE_URL};

pub const API_KEY_ENV: &str = "NEWSDATA_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub refresh_interval_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_items: usize,
    pub data_dir: Option<PathBuf>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    /// Passed to the API as `q`.
    pub query: Option<String>,
    pub feeds: Vec<FeedConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    pub url: String,
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval_secs: 60,
            cache_ttl_secs: cache::DEFAULT_TTL.as_secs(),
            cache_max_items: cache::DEFAULT_MAX_ITEMS,
            data_dir: None,
            language: None,
            country: None,
            category: None,
            query: None,
            feeds: Vec::new(),
        }
    }
}

impl Config {
    /// Resolve the full configuration for this run.
    pub fn load(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(key) = get(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(key) = &args.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(dir) = &args.data_dir {
            self.data_dir = Some(dir.clone());
        }
        if let Some(secs) = args.interval {
            self.refresh_interval_secs = secs;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be greater than zero");
        }
        if self.cache_ttl_secs == 0 {
            bail!("cache_ttl_secs must be greater than zero");
        }
        if self.cache_max_items == 0 {
            bail!("cache_max_items must be greater than zero");
        }
        reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("base_url '{}' is not a valid URL", self.base_url))?;
        if self.api_key().is_none() && self.feeds.is_empty() {
            bail!(
                "no news source configured: set api_key in the config file, \
                 export {API_KEY_ENV}, pass --api-key, or add [[feeds]]"
            );
        }
        Ok(())
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn news_query(&self) -> NewsQuery {
        NewsQuery {
            language: self.language.clone(),
            country: self.country.clone(),
            category: self.category.clone(),
            q: self.query.clone(),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| xdg_dir("XDG_DATA_HOME", ".local/share"))
            .unwrap_or_else(|| PathBuf::from(".newsdesk"))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("config.toml"))
}

/// `$<var>/newsdesk`, else `$HOME/<fallback>/newsdesk`.
fn xdg_dir(var: &str, fallback: &str) -> Option<PathBuf> {
    let base = std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(fallback)))?;
    Some(base.join("newsdesk"))
}
