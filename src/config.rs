//! Catalog configuration file support
//!
//! Handles parsing of the `config.json` file shared by both tools and
//! environment variable overrides for credentials and import polling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::convert::ConverterSettings;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = "config.json";

/// Environment variable for the catalog base URL
pub const ENV_CATALOG_URL: &str = "CATALOG_URL";

/// Environment variable for the catalog username
pub const ENV_CATALOG_USERNAME: &str = "CATALOG_USERNAME";

/// Environment variable for the catalog password
pub const ENV_CATALOG_PASSWORD: &str = "CATALOG_PASSWORD";

/// Environment variable for the import job poll interval in milliseconds
pub const ENV_POLL_INTERVAL_MS: &str = "CATALOG_POLL_INTERVAL_MS";

/// Environment variable for the import job poll timeout in seconds
pub const ENV_POLL_TIMEOUT_SECS: &str = "CATALOG_POLL_TIMEOUT_SECS";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    /// Config content is not valid JSON or misses required keys
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Governance domain names used by the OpenAPI import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainNames {
    /// Domain holding schemas, properties and endpoints
    pub data_assets: String,
    /// Domain holding the API asset itself
    pub api_assets: String,
    /// Domain holding response code values
    pub code_values: String,
    /// Any further domains listed in the file
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

/// Catalog asset type names used by the OpenAPI import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeNames {
    /// Type of the API asset
    pub api: String,
    /// Type of endpoint assets
    pub api_endpoint: String,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

/// Import job polling section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Delay between job status polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up polling after this many seconds; unset polls until the job ends
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: None,
        }
    }
}

impl ImportSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Main configuration structure
///
/// Represents the `config.json` file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog base URL, e.g. `https://acme.collibra.com`
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Community that owns every domain referenced by import records
    pub community_name: String,

    pub domains: DomainNames,

    pub assets: AssetTypeNames,

    #[serde(default)]
    pub import: ImportSettings,
}

impl CatalogConfig {
    /// Load configuration from a file and apply environment overrides
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a JSON string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_CATALOG_URL) {
            self.url = url;
        }

        if let Ok(username) = std::env::var(ENV_CATALOG_USERNAME) {
            self.username = username;
        }

        if let Ok(password) = std::env::var(ENV_CATALOG_PASSWORD) {
            self.password = password;
        }

        if let Ok(interval) = std::env::var(ENV_POLL_INTERVAL_MS)
            && let Ok(interval) = interval.parse()
        {
            self.import.poll_interval_ms = interval;
        }

        if let Ok(timeout) = std::env::var(ENV_POLL_TIMEOUT_SECS)
            && let Ok(timeout) = timeout.parse()
        {
            self.import.timeout_secs = Some(timeout);
        }
    }

    /// Settings the OpenAPI converter needs to scope record identifiers
    pub fn converter_settings(&self) -> ConverterSettings {
        ConverterSettings {
            community_name: self.community_name.clone(),
            data_assets_domain: self.domains.data_assets.clone(),
            api_assets_domain: self.domains.api_assets.clone(),
            code_values_domain: self.domains.code_values.clone(),
            api_type: self.assets.api.clone(),
            endpoint_type: self.assets.api_endpoint.clone(),
        }
    }
}
