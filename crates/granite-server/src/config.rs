//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults. Only the revocation issuer and audience are required: the
//! application cannot safely accept revocation tokens without knowing who
//! is allowed to send them.

use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Base URL for the server (used in generated URLs).
    pub base_url: String,

    /// Expected issuer of revocation tokens.
    pub revocation_issuer: String,

    /// Expected audience of revocation tokens.
    pub revocation_audience: String,

    /// JWKS endpoint publishing the issuer's signing keys.
    pub jwks_url: String,

    /// Key-set cache TTL in seconds.
    pub jwks_cache_ttl: u64,

    /// Minimum seconds between remote key-set fetch attempts.
    pub jwks_min_refresh: u64,

    /// Step-up freshness window in seconds.
    pub step_up_window_secs: i64,

    /// Whether to set the `Secure` flag on session cookies.
    pub cookie_secure: bool,

    /// Log level.
    pub log_level: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let host = std::env::var("GRANITE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("GRANITE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let base_url = std::env::var("GRANITE_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));

        let revocation_issuer = std::env::var("GRANITE_REVOCATION_ISSUER").map_err(|_| {
            anyhow::anyhow!("GRANITE_REVOCATION_ISSUER environment variable is required")
        })?;

        let revocation_audience = std::env::var("GRANITE_REVOCATION_AUDIENCE").map_err(|_| {
            anyhow::anyhow!("GRANITE_REVOCATION_AUDIENCE environment variable is required")
        })?;

        let jwks_url = std::env::var("GRANITE_JWKS_URL")
            .unwrap_or_else(|_| format!("{}/v1/keys", revocation_issuer.trim_end_matches('/')));

        let jwks_cache_ttl = std::env::var("GRANITE_JWKS_CACHE_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300); // 5 minutes

        let jwks_min_refresh = std::env::var("GRANITE_JWKS_MIN_REFRESH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let step_up_window_secs = std::env::var("GRANITE_STEP_UP_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300); // 5 minutes

        let cookie_secure = std::env::var("GRANITE_COOKIE_SECURE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            host,
            port,
            base_url,
            revocation_issuer,
            revocation_audience,
            jwks_url,
            jwks_cache_ttl,
            jwks_min_refresh,
            step_up_window_secs,
            cookie_secure,
            log_level,
        })
    }

    /// Creates a configuration for testing.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            base_url: "http://localhost:8080".to_string(),
            revocation_issuer: "https://idp.example.com".to_string(),
            revocation_audience: "granite-bank".to_string(),
            jwks_url: "https://idp.example.com/v1/keys".to_string(),
            jwks_cache_ttl: 300,
            jwks_min_refresh: 0,
            step_up_window_secs: 300,
            cookie_secure: false,
            log_level: "debug".to_string(),
        }
    }

    /// Returns the key-set cache TTL as a duration.
    #[must_use]
    pub fn jwks_cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl)
    }

    /// Returns the minimum key-set refresh interval as a duration.
    #[must_use]
    pub fn jwks_min_refresh_duration(&self) -> Duration {
        Duration::from_secs(self.jwks_min_refresh)
    }
}
