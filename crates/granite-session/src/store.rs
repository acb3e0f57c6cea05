//! Session store contract and in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SessionResult;
use crate::record::SessionRecord;

/// Storage for session records.
///
/// The store is the authoritative owner of session data. Implementations
/// may be in-memory, Redis-backed, or database-backed; consumers treat it
/// as at-least-eventually-consistent and tolerate partial enumeration.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Gets a session record by id.
    async fn get(&self, session_id: &str) -> SessionResult<Option<SessionRecord>>;

    /// Inserts or replaces a session record.
    async fn insert(&self, record: SessionRecord) -> SessionResult<()>;

    /// Destroys a session by id.
    ///
    /// Destroying an id that is already gone is not an error.
    async fn destroy(&self, session_id: &str) -> SessionResult<()>;

    /// Enumerates every session in the store.
    ///
    /// Used by the revocation fallback scanner. Callers must tolerate
    /// records with missing principal fields (skip, never fail the scan).
    async fn all(&self) -> SessionResult<HashMap<String, SessionRecord>>;
}

/// In-memory session store with process lifetime.
///
/// Sessions do not survive a restart; the revocation path compensates by
/// always pairing the directory fast path with a full-store scan.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Checks whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> SessionResult<Option<SessionRecord>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn insert(&self, record: SessionRecord) -> SessionResult<()> {
        self.sessions.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> SessionResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn all(&self) -> SessionResult<HashMap<String, SessionRecord>> {
        Ok(self.sessions.read().await.clone())
    }
}

/// A store wrapper that fails destroys, for exercising best-effort paths.
#[cfg(test)]
pub(crate) struct FailingDestroyStore {
    pub inner: MemorySessionStore,
}

#[cfg(test)]
#[async_trait]
impl SessionStore for FailingDestroyStore {
    async fn get(&self, session_id: &str) -> SessionResult<Option<SessionRecord>> {
        self.inner.get(session_id).await
    }

    async fn insert(&self, record: SessionRecord) -> SessionResult<()> {
        self.inner.insert(record).await
    }

    async fn destroy(&self, _session_id: &str) -> SessionResult<()> {
        Err(crate::error::SessionError::Storage(
            "destroy refused".to_string(),
        ))
    }

    async fn all(&self) -> SessionResult<HashMap<String, SessionRecord>> {
        self.inner.all().await
    }
}
