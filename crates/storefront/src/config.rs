//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BACKEND_ORIGIN` - Catalog backend origin (default: production origin)
//! - `BACKEND_ALLOW_HTTP` - Use plain HTTP to reach the backend (local
//!   development only; default: false)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! The backend origin is resolved once here and carried as an explicit
//! value from then on; nothing re-reads the environment per request.

use std::net::{IpAddr, SocketAddr};

use relikt_arte_core::url::{ApiBase, DEFAULT_ORIGIN};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog backend configuration
    pub backend: BackendConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Catalog backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend origin (host, optionally with scheme and port)
    pub origin: String,
    /// Allow plain HTTP to the backend (local development)
    pub allow_http: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string()))?;

        let backend = BackendConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            backend,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    /// Load backend configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `BACKEND_ALLOW_HTTP` is unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let origin = get_env_or_default("BACKEND_ORIGIN", DEFAULT_ORIGIN);
        let allow_http = parse_bool(&get_env_or_default("BACKEND_ALLOW_HTTP", "false"))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "BACKEND_ALLOW_HTTP".to_string(),
                    "expected true/false/1/0".to_string(),
                )
            })?;

        Ok(Self { origin, allow_http })
    }

    /// The base address requests to the backend are built against.
    #[must_use]
    pub fn api_base(&self) -> ApiBase {
        ApiBase::new(&self.origin, self.allow_http)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean environment value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_api_base_uses_origin_and_flag() {
        let backend = BackendConfig {
            origin: "https://example.com".to_string(),
            allow_http: false,
        };
        let base = backend.api_base();
        assert_eq!(base.origin(), "example.com");
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            backend: BackendConfig {
                origin: DEFAULT_ORIGIN.to_string(),
                allow_http: false,
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
