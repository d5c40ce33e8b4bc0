//! Configuration management for shipwise
//!
//! Config stored at: ~/.config/shipwise/config.json

use serde::{Deserialize, Serialize};
use shipwise_infra::http::{ApiConfig, DEFAULT_ORDER_PATH, DEFAULT_RATE_PATH};
use shipwise_types::{ConfigError, OutputFormat, Result};
use std::path::{Path, PathBuf};
use url::Url;

pub const ENV_API_URL: &str = "SHIPWISE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SHIPWISE_TIMEOUT_SECS";
pub const ENV_API_TOKEN: &str = "SHIPWISE_API_TOKEN";

const APP_DIR: &str = "shipwise";
const WAREHOUSES_FILE: &str = "warehouses.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the rating and order services
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Rate calculator path, relative to the base URL
    #[serde(default = "default_rate_path")]
    pub rate_path: String,

    /// Order hand-off path, relative to the base URL
    #[serde(default = "default_order_path")]
    pub order_path: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the rating service to include return-to-origin charges
    #[serde(default)]
    pub include_rto: bool,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Warehouse directory override
    #[serde(default)]
    pub warehouses_file: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_rate_path() -> String {
    DEFAULT_RATE_PATH.to_string()
}

fn default_order_path() -> String {
    DEFAULT_ORDER_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            rate_path: default_rate_path(),
            order_path: default_order_path(),
            timeout_secs: default_timeout_secs(),
            include_rto: false,
            output_format: default_output_format(),
            warehouses_file: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Warehouse directory path: the override if set, else next to the config file
    pub fn warehouses_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.warehouses_file {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join(WAREHOUSES_FILE))
    }

    /// Load config from file (or defaults) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply `SHIPWISE_API_URL` / `SHIPWISE_TIMEOUT_SECS` from `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::ParseError(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
        }
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Connection settings for the HTTP clients; the token comes from the environment only
    pub fn api_config(&self) -> Result<ApiConfig> {
        self.api_config_with_token(std::env::var(ENV_API_TOKEN).ok())
    }

    pub fn api_config_with_token(&self, api_token: Option<String>) -> Result<ApiConfig> {
        let base_url = Url::parse(&self.api_base_url).map_err(|e| {
            ConfigError::InvalidUrl("api_base_url".to_string(), format!("{:?}: {}", self.api_base_url, e))
        })?;
        Ok(ApiConfig {
            base_url,
            rate_path: self.rate_path.clone(),
            order_path: self.order_path.clone(),
            api_token: api_token.filter(|t| !t.is_empty()),
            timeout_secs: self.timeout_secs,
        })
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Shipwise Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "API base URL:    {}", self.api_base_url)?;
        writeln!(f, "Rate path:       {}", self.rate_path)?;
        writeln!(f, "Order path:      {}", self.order_path)?;
        writeln!(f, "Timeout:         {}s", self.timeout_secs)?;
        writeln!(f, "Include RTO:     {}", self.include_rto)?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(
            f,
            "Warehouses file: {}",
            self.warehouses_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "API token:       {}",
            if std::env::var(ENV_API_TOKEN).is_ok() {
                "(set via SHIPWISE_API_TOKEN)"
            } else {
                "(none)"
            }
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
