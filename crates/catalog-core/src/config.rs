//! Configuration for the component catalog
//!
//! Values start from defaults and are overridden by environment variables
//! (optionally loaded from a `.env` file).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::storage::StoreConfig;

/// Request timeout used when `APP_ENV=production`
pub const PRODUCTION_TIMEOUT_MS: u64 = 15_000;

/// Request timeout used everywhere else
pub const DEVELOPMENT_TIMEOUT_MS: u64 = 10_000;

/// Remote component provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the provider
    #[serde(default)]
    pub base_url: String,

    /// Full JSON-RPC endpoint, `{base_url}/mcp` unless set explicitly
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Bound on one request, including reading the body
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether the provider may be called at all
    #[serde(default)]
    pub enabled: bool,
}

fn default_timeout_ms() -> u64 {
    DEVELOPMENT_TIMEOUT_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint: String::new(),
            auth_token: None,
            timeout_ms: default_timeout_ms(),
            enabled: false,
        }
    }
}

impl ClientConfig {
    /// Enabled client for `base_url`, with the endpoint derived from it
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            endpoint: endpoint_for(&base_url),
            base_url,
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn endpoint_for(base_url: &str) -> String {
    format!("{}/mcp", base_url.trim_end_matches('/'))
}

/// Complete catalog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Remote provider; when disabled the static catalog file is used
    pub client: ClientConfig,

    /// Snapshot TTL in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Bound on one catalog load in milliseconds
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,

    /// Catalog document read when no provider is enabled
    #[serde(default = "default_static_catalog_path")]
    pub static_catalog_path: PathBuf,
}

fn default_cache_ttl_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_load_timeout_ms() -> u64 {
    10_000
}

fn default_static_catalog_path() -> PathBuf {
    PathBuf::from("catalog/components.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            cache_ttl_ms: default_cache_ttl_ms(),
            load_timeout_ms: default_load_timeout_ms(),
            static_catalog_path: default_static_catalog_path(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a `.env` file (if any) and the environment
    pub fn load() -> Self {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment overrides from .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut config = Self::default();

        let production = lookup("APP_ENV")
            .map(|env| env.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        if production {
            config.client.timeout_ms = PRODUCTION_TIMEOUT_MS;
        }

        if let Some(base_url) = non_blank(lookup("COMPONENT_MCP_BASE_URL")) {
            config.client.base_url = base_url.trim_end_matches('/').to_string();
        }

        config.client.endpoint = match non_blank(lookup("COMPONENT_MCP_ENDPOINT")) {
            Some(endpoint) => endpoint,
            None if !config.client.base_url.is_empty() => endpoint_for(&config.client.base_url),
            None => String::new(),
        };

        config.client.auth_token = non_blank(lookup("COMPONENT_MCP_TOKEN"));

        if let Some(timeout) = lookup("COMPONENT_MCP_TIMEOUT_MS") {
            match timeout.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.client.timeout_ms = ms,
                _ => warn!("Invalid COMPONENT_MCP_TIMEOUT_MS value: {}", timeout),
            }
        }

        config.client.enabled = !config.client.endpoint.is_empty();
        if let Some(enabled) = lookup("COMPONENT_MCP_ENABLED") {
            match parse_flag(&enabled) {
                Some(flag) => config.client.enabled = flag && !config.client.endpoint.is_empty(),
                None => warn!("Invalid COMPONENT_MCP_ENABLED value: {}", enabled),
            }
        }

        if let Some(ttl) = lookup("CATALOG_CACHE_TTL_MS") {
            match ttl.trim().parse::<u64>() {
                Ok(ms) => config.cache_ttl_ms = ms,
                Err(_) => warn!("Invalid CATALOG_CACHE_TTL_MS value: {}", ttl),
            }
        }

        if let Some(timeout) = lookup("CATALOG_LOAD_TIMEOUT_MS") {
            match timeout.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.load_timeout_ms = ms,
                _ => warn!("Invalid CATALOG_LOAD_TIMEOUT_MS value: {}", timeout),
            }
        }

        if let Some(path) = non_blank(lookup("CATALOG_PATH")) {
            config.static_catalog_path = PathBuf::from(path);
        }

        info!(
            remote = config.client.enabled,
            endpoint = %config.client.endpoint,
            cache_ttl_ms = config.cache_ttl_ms,
            "Catalog configuration loaded"
        );
        config
    }

    /// Store settings derived from this configuration
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            ttl: Duration::from_millis(self.cache_ttl_ms),
            load_timeout: Duration::from_millis(self.load_timeout_ms),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
