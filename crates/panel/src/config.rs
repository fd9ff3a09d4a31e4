//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults produce a working local setup.
//!
//! - `PANEL_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite://storekeeper.db`; generic `DATABASE_URL` also honored)
//! - `PANEL_HOST` - Bind address (default: 127.0.0.1)
//! - `PANEL_PORT` - Listen port (default: 8000)
//! - `STORE_API_BASE_URL` - Base URL of the external product API
//!   (default: `https://api.escuelajs.co/api/v1`)
//! - `STORE_API_TIMEOUT_SECS` - Per-call timeout in seconds (default: 20)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://storekeeper.db";
const DEFAULT_STORE_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";
const DEFAULT_STORE_API_TIMEOUT_SECS: u64 = 20;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Panel application configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// External product API configuration
    pub store_api: StoreApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// External product API configuration.
#[derive(Debug, Clone)]
pub struct StoreApiConfig {
    /// Base URL without a trailing slash (e.g., `https://api.escuelajs.co/api/v1`)
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PANEL_DATABASE_URL");
        let host = get_env_or_default("PANEL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PANEL_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_PORT".to_string(), e.to_string()))?;

        let store_api = StoreApiConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            store_api,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StoreApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&get_env_or_default(
            "STORE_API_BASE_URL",
            DEFAULT_STORE_API_BASE_URL,
        ));
        let timeout_secs = get_env_or_default(
            "STORE_API_TIMEOUT_SECS",
            &DEFAULT_STORE_API_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("STORE_API_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }

    /// Returns the per-call timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`, then the
/// local-file default.
fn get_database_url(primary_key: &str) -> SecretString {
    if let Ok(value) = std::env::var(primary_key) {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from(DEFAULT_DATABASE_URL)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Strip any trailing slashes so endpoint paths can be appended uniformly.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.escuelajs.co/api/v1/"),
            "https://api.escuelajs.co/api/v1"
        );
        assert_eq!(
            normalize_base_url("https://api.escuelajs.co/api/v1"),
            "https://api.escuelajs.co/api/v1"
        );
    }

    #[test]
    fn test_store_api_timeout() {
        let config = StoreApiConfig {
            base_url: DEFAULT_STORE_API_BASE_URL.to_string(),
            timeout_secs: 20,
        };
        assert_eq!(config.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_socket_addr() {
        let config = PanelConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            store_api: StoreApiConfig {
                base_url: DEFAULT_STORE_API_BASE_URL.to_string(),
                timeout_secs: DEFAULT_STORE_API_TIMEOUT_SECS,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }
}
