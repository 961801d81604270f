//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STYLEHUB_STORE_URL` - Base URL of the remote catalog/cart store REST API
//! - `STYLEHUB_STORE_API_KEY` - Store API key (sent with every request)
//!
//! ## Optional
//! - `STYLEHUB_CATALOG_CACHE_TTL_SECS` - Product cache TTL (default: 300)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote store configuration.
    pub store: StoreConfig,
}

/// Remote catalog/cart store configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store's REST API (e.g., <https://store.example.com/rest/v1>).
    pub base_url: Url,
    /// API key sent with every request.
    pub api_key: SecretString,
    /// How long the product catalog may be served from cache.
    pub catalog_cache_ttl: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("catalog_cache_ttl", &self.catalog_cache_ttl)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            store: StoreConfig::from_env()?,
        })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("STYLEHUB_STORE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STYLEHUB_STORE_URL".to_string(), e.to_string())
        })?;

        let api_key = get_required_secret("STYLEHUB_STORE_API_KEY")?;

        let ttl_secs = get_env_or_default("STYLEHUB_CATALOG_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "STYLEHUB_CATALOG_CACHE_TTL_SECS".to_string(),
                    e.to_string(),
                )
            })?;

        Ok(Self {
            base_url,
            api_key,
            catalog_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
