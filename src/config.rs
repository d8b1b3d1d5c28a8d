//! Configuration management for channel-videos.
//!
//! Handles loading configuration from JSONC files and applying the API key
//! from the environment. Resolved once at startup and handed to the fetcher.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API v3 key (may be empty; requests are still sent)
    pub api_key: String,
    /// Base URL for YouTube Data API
    pub api_base_url: String,
    /// Origin serving `default-videos.json`
    pub static_base_url: String,
    /// Transport timeout for a single request
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            static_base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/channel-videos/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| format!("Failed to deserialize config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Replace the API key with an override, if one is given and non-empty.
    ///
    /// # Arguments
    /// * `api_key` - Typically the value of [`API_KEY_ENV`]
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to config file or error
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("channel-videos").join("config.jsonc"))
    }
}

/// Strip `//` comments that are not inside a string.
///
/// Quote counting is simplified and does not handle escaped quotes.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            line.match_indices("//")
                .map(|(pos, _)| pos)
                .find(|&pos| line[..pos].matches('"').count() % 2 == 0)
                .map_or(line, |pos| line[..pos].trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
