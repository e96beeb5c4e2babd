//! Configuration for kubepilot.
//!
//! Settings come from an optional JSON file at `~/.kubepilot/config.json`,
//! overridden by environment variables. Everything is read once at startup;
//! the only fatal condition is a missing model API key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no model API key configured (set KUBEPILOT_API_KEY)")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Model endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            model: default_model(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Cluster resource API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_resource_api")]
    pub resource_api: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            resource_api: default_resource_api(),
        }
    }
}

fn default_resource_api() -> String {
    "http://localhost:8000/api/v1/resources".to_string()
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub serpapi_key: String,
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Path to the config file (~/.kubepilot/config.json).
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kubepilot")
        .join("config.json")
}

impl Config {
    /// Load from the default location, apply environment overrides and
    /// require an API key.
    pub async fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path()).await?;
        config.apply_env();
        config.require_api_key()?;
        Ok(config)
    }

    /// Load from a specific file; a missing file yields the defaults.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config file at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        debug!("loading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Environment variables take precedence over file values.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("KUBEPILOT_API_KEY") {
            self.model.api_key = key;
        }
        if let Ok(base) = std::env::var("KUBEPILOT_API_BASE") {
            self.model.api_base = base;
        }
        if let Ok(model) = std::env::var("KUBEPILOT_MODEL") {
            self.model.model = model;
        }
        if let Ok(url) = std::env::var("KUBEPILOT_RESOURCE_API") {
            self.cluster.resource_api = url;
        }
        if let Ok(key) = std::env::var("SERPAPI_API_KEY") {
            self.search.serpapi_key = key;
        }
    }

    /// The one unconditionally fatal startup condition.
    pub fn require_api_key(&self) -> Result<()> {
        if self.model.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    pub fn serpapi_key(&self) -> Option<String> {
        if self.search.serpapi_key.is_empty() {
            None
        } else {
            Some(self.search.serpapi_key.clone())
        }
    }
}
