//! Top-level application configuration.
//!
//! Configuration is stored in `<root>/config.yaml` and includes:
//! - The directory API base URL and an optional version pin
//! - Nationalities applied to every request
//! - Listing page size, search pool size and search debounce delay
//! - Remote operation timeout

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UserdexError};
use crate::listing::ListingConfig;
use crate::paths::config_path;
use crate::types::{MAX_RESULTS, Nationality};

/// Default directory API endpoint.
pub const DEFAULT_API_URL: &str = "https://randomuser.me/api";

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "USERDEX_API_URL";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "api_version",
    "nationalities",
    "page_size",
    "search_pool_size",
    "search_debounce_ms",
    "remote_timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API version pin (e.g. "1.4"), appended to the base URL path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Nationalities requested on every fetch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nationalities: Vec<Nationality>,

    /// Records per listing page (default: 12)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Records fetched when searching, filtered locally (default: 5000)
    #[serde(default = "default_search_pool_size")]
    pub search_pool_size: u32,

    /// Quiet period before a typed search fires, in milliseconds (default: 300)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Remote operation timeout in seconds (default: 30)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_search_pool_size() -> u32 {
    MAX_RESULTS
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: None,
            nationalities: Vec::new(),
            page_size: default_page_size(),
            search_pool_size: default_search_pool_size(),
            search_debounce_ms: default_search_debounce_ms(),
            remote_timeout: default_remote_timeout(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        config_path()
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            UserdexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                UserdexError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            UserdexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_RESULTS {
            return Err(UserdexError::Config(format!(
                "page_size must be between 1 and {MAX_RESULTS}, got {}",
                self.page_size
            )));
        }
        if self.search_pool_size == 0 || self.search_pool_size > MAX_RESULTS {
            return Err(UserdexError::Config(format!(
                "search_pool_size must be between 1 and {MAX_RESULTS}, got {}",
                self.search_pool_size
            )));
        }
        Ok(())
    }

    /// Get the API base URL from the environment or the config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }

        self.api_url.clone()
    }

    /// Get the remote operation timeout duration
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout)
    }

    /// Get the search debounce delay
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Reconciler settings derived from this configuration
    pub fn listing_config(&self) -> ListingConfig {
        ListingConfig {
            page_size: self.page_size,
            search_pool_size: self.search_pool_size,
            nationalities: self.nationalities.clone(),
            version: self.api_version.clone(),
        }
    }

    /// Read a single setting as text
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_url" => self.api_url(),
            "api_version" => self.api_version.clone().unwrap_or_default(),
            "nationalities" => self
                .nationalities
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>()
                .join(","),
            "page_size" => self.page_size.to_string(),
            "search_pool_size" => self.search_pool_size.to_string(),
            "search_debounce_ms" => self.search_debounce_ms.to_string(),
            "remote_timeout" => self.remote_timeout.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Update a single setting from text. An empty value clears optional settings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let mut next = self.clone();
        match key {
            "api_url" => {
                url::Url::parse(value)
                    .map_err(|e| UserdexError::InvalidUrl(value.to_string(), e.to_string()))?;
                next.api_url = value.to_string();
            }
            "api_version" => {
                next.api_version = (!value.is_empty()).then(|| value.to_string());
            }
            "nationalities" => {
                next.nationalities = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<Nationality>())
                    .collect::<Result<Vec<Nationality>>>()?;
            }
            "page_size" => next.page_size = parse_number(key, value)?,
            "search_pool_size" => next.search_pool_size = parse_number(key, value)?,
            "search_debounce_ms" => next.search_debounce_ms = parse_number(key, value)?,
            "remote_timeout" => next.remote_timeout = parse_number(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn unknown_key(key: &str) -> UserdexError {
    UserdexError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| UserdexError::Config(format!("{key} must be a number, got '{value}'")))
}
