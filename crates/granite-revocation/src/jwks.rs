//! JSON Web Key Set types and the cached remote key set.
//!
//! Keys are fetched from the identity authority's JWKS endpoint and
//! cached with a TTL. A key id that misses the cache triggers a refetch
//! (key rotation), bounded by a minimum interval between remote attempts
//! so a flood of unknown kids cannot hammer the endpoint.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{ValidationError, ValidationResult};

/// HTTP timeout for JWKS fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default key-set cache TTL: five minutes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default minimum interval between remote fetch attempts.
pub const DEFAULT_MIN_REFRESH: Duration = Duration::from_secs(30);

/// A JSON Web Key as defined in RFC 7517.
///
/// Only the RSA members are modeled; the validator accepts nothing but
/// the RSA signature family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type (e.g. "RSA").
    pub kty: String,

    /// Key ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Public key use ("sig" for signature).
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,

    /// Algorithm (e.g. "RS256").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    /// RSA modulus (base64url encoded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// RSA exponent (base64url encoded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

/// A JSON Web Key Set as defined in RFC 7517.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwkSet {
    /// Array of JWK values.
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Finds a key by its ID.
    #[must_use]
    pub fn find_key(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

#[derive(Default)]
struct CacheState {
    jwks: Option<JwkSet>,
    fetched_at: Option<Instant>,
    last_attempt: Option<Instant>,
}

enum KeySource {
    /// Fixed key set, for tests and static deployments.
    Static(JwkSet),
    /// Remote JWKS endpoint with caching.
    Remote {
        url: String,
        http: reqwest::Client,
        ttl: Duration,
        min_refresh: Duration,
        cache: RwLock<CacheState>,
    },
}

/// Cached mapping from key id to public key.
///
/// Process-wide singleton with process lifetime; the cache does not
/// persist across restarts.
pub struct RemoteKeySet {
    source: KeySource,
}

impl RemoteKeySet {
    /// Creates a key set backed by a remote JWKS endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            source: KeySource::Remote {
                url: url.into(),
                http,
                ttl: DEFAULT_CACHE_TTL,
                min_refresh: DEFAULT_MIN_REFRESH,
                cache: RwLock::new(CacheState::default()),
            },
        }
    }

    /// Creates a key set from a fixed set of keys (never fetches).
    #[must_use]
    pub fn with_static(jwks: JwkSet) -> Self {
        Self {
            source: KeySource::Static(jwks),
        }
    }

    /// Sets the cache TTL.
    #[must_use]
    pub fn with_cache_ttl(mut self, value: Duration) -> Self {
        if let KeySource::Remote { ref mut ttl, .. } = self.source {
            *ttl = value;
        }
        self
    }

    /// Sets the minimum interval between remote fetch attempts.
    #[must_use]
    pub fn with_min_refresh(mut self, value: Duration) -> Self {
        if let KeySource::Remote {
            ref mut min_refresh,
            ..
        } = self.source
        {
            *min_refresh = value;
        }
        self
    }

    /// Resolves a key by id, refetching on a cache miss.
    ///
    /// # Errors
    ///
    /// Any resolution failure - unknown kid, fetch failure, refresh rate
    /// exceeded with no usable cache - surfaces as
    /// [`ValidationError::KeyNotFound`]; the detail is logged, not
    /// returned.
    pub async fn get_key(&self, kid: &str) -> ValidationResult<Jwk> {
        match &self.source {
            KeySource::Static(jwks) => jwks
                .find_key(kid)
                .cloned()
                .ok_or_else(|| ValidationError::KeyNotFound(kid.to_string())),
            KeySource::Remote {
                url,
                http,
                ttl,
                min_refresh,
                cache,
            } => {
                {
                    let state = cache.read().await;
                    if let (Some(jwks), Some(fetched_at)) = (&state.jwks, state.fetched_at) {
                        if fetched_at.elapsed() < *ttl {
                            if let Some(key) = jwks.find_key(kid) {
                                return Ok(key.clone());
                            }
                        }
                    }
                }

                // Cache miss or expired: refetch, bounded by the refresh
                // ceiling. An unknown kid after a fresh fetch stays unknown.
                let jwks = Self::refresh(url, http, *min_refresh, cache, kid).await?;
                jwks.find_key(kid)
                    .cloned()
                    .ok_or_else(|| ValidationError::KeyNotFound(kid.to_string()))
            }
        }
    }

    async fn refresh(
        url: &str,
        http: &reqwest::Client,
        min_refresh: Duration,
        cache: &RwLock<CacheState>,
        kid: &str,
    ) -> ValidationResult<JwkSet> {
        let mut state = cache.write().await;

        if let Some(last_attempt) = state.last_attempt {
            if last_attempt.elapsed() < min_refresh {
                tracing::warn!(kid = %kid, "key set refresh rate exceeded; using cached keys");
                return state
                    .jwks
                    .clone()
                    .ok_or_else(|| ValidationError::KeyNotFound(kid.to_string()));
            }
        }
        state.last_attempt = Some(Instant::now());

        match Self::fetch(url, http).await {
            Ok(jwks) => {
                state.jwks = Some(jwks.clone());
                state.fetched_at = Some(Instant::now());
                Ok(jwks)
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "key set fetch failed");
                // A stale key set still beats no key set.
                state
                    .jwks
                    .clone()
                    .ok_or_else(|| ValidationError::KeyNotFound(kid.to_string()))
            }
        }
    }

    async fn fetch(url: &str, http: &reqwest::Client) -> Result<JwkSet, String> {
        let response = http
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| format!("invalid JWKS body: {e}"))
    }
}

impl std::fmt::Debug for RemoteKeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            KeySource::Static(jwks) => f
                .debug_struct("RemoteKeySet")
                .field("source", &"static")
                .field("keys", &jwks.keys.len())
                .finish(),
            KeySource::Remote { url, ttl, .. } => f
                .debug_struct("RemoteKeySet")
                .field("url", url)
                .field("ttl", ttl)
                .finish(),
        }
    }
}
