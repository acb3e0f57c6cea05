//! Application state management.
//!
//! The directory, store, and validator are process-wide singletons with
//! process lifetime; handlers receive them through this shared state so
//! tests can construct a fresh set per case instead of relying on
//! globals.

use std::sync::Arc;

use granite_revocation::{RemoteKeySet, RevocationTokenValidator};
use granite_session::{MemorySessionStore, SessionDirectory, SessionStore};

use crate::config::ServerConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Session store (authoritative owner of session records).
    pub store: Arc<dyn SessionStore>,

    /// User identity → session id index.
    pub directory: Arc<SessionDirectory>,

    /// Revocation token validator.
    pub validator: Arc<RevocationTokenValidator>,
}

impl AppState {
    /// Creates application state from explicit components.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn SessionStore>,
        directory: Arc<SessionDirectory>,
        validator: Arc<RevocationTokenValidator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            directory,
            validator,
        }
    }

    /// Creates application state with default components wired from the
    /// configuration: an in-memory store and a remote key set.
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        let keys = RemoteKeySet::new(config.jwks_url.clone())
            .with_cache_ttl(config.jwks_cache_ttl_duration())
            .with_min_refresh(config.jwks_min_refresh_duration());
        let validator = RevocationTokenValidator::new(
            keys,
            config.revocation_issuer.clone(),
            config.revocation_audience.clone(),
        );

        Self::new(
            config,
            Arc::new(MemorySessionStore::new()),
            Arc::new(SessionDirectory::new()),
            Arc::new(validator),
        )
    }
}
