//! Session directory: user identity to active session ids.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use crate::store::SessionStore;

/// In-process index from normalized user identity to active session ids.
///
/// The directory is a fast path for "destroy every session of this user".
/// It is never the sole source of truth: it is keyed by lowercased email
/// only, lives in process memory, and loses state on restart, so the
/// revocation flow always pairs it with a full-store scan.
///
/// Every mapping mutation completes synchronously under the lock, with no
/// suspension point between reading and writing a key's set. Interleaved
/// register/unregister calls on the same identity therefore cannot lose
/// updates.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    entries: RwLock<HashMap<String, HashSet<String>>>,
}

impl SessionDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session id under an identity.
    ///
    /// Identity is normalized to lowercase. Registration is idempotent;
    /// empty identity or session id degrades to a no-op rather than an
    /// error.
    pub fn register(&self, identity: &str, session_id: &str) {
        if identity.is_empty() || session_id.is_empty() {
            return;
        }
        let key = identity.to_lowercase();

        let mut entries = self.entries.write();
        entries
            .entry(key)
            .or_default()
            .insert(session_id.to_string());
        drop(entries);

        tracing::info!(identity = %identity, session_id = %session_id, "session registered");
    }

    /// Unregisters a session id from an identity.
    ///
    /// Prunes the entry when its set empties; unknown identities are a
    /// no-op.
    pub fn unregister(&self, identity: &str, session_id: &str) {
        if identity.is_empty() || session_id.is_empty() {
            return;
        }
        let key = identity.to_lowercase();

        let mut entries = self.entries.write();
        if let Some(sessions) = entries.get_mut(&key) {
            sessions.remove(session_id);
            if sessions.is_empty() {
                entries.remove(&key);
            }
        }
        drop(entries);

        tracing::info!(identity = %identity, session_id = %session_id, "session unregistered");
    }

    /// Destroys every session registered under an identity.
    ///
    /// Removes the directory entry first, then issues a store destroy for
    /// each member id. Individual destroy failures are logged and
    /// swallowed; the directory's bookkeeping removal is unconditional
    /// and every member is counted regardless of store outcome. Returns 0
    /// without touching the store when no entry exists.
    pub async fn destroy_all_for_identity(
        &self,
        store: &dyn SessionStore,
        identity: &str,
    ) -> u64 {
        let key = identity.to_lowercase();

        let Some(sessions) = self.entries.write().remove(&key) else {
            return 0;
        };

        let mut destroyed = 0;
        for session_id in &sessions {
            if let Err(err) = store.destroy(session_id).await {
                tracing::warn!(
                    identity = %identity,
                    session_id = %session_id,
                    error = %err,
                    "store destroy failed; continuing"
                );
            }
            tracing::info!(identity = %identity, session_id = %session_id, "session destroyed");
            destroyed += 1;
        }
        destroyed
    }

    /// Returns the session ids currently registered for an identity.
    #[must_use]
    pub fn sessions_for(&self, identity: &str) -> HashSet<String> {
        self.entries
            .read()
            .get(&identity.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of identities with at least one session.
    #[must_use]
    pub fn identity_count(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::principal::Principal;
    use crate::record::SessionRecord;
    use crate::store::{FailingDestroyStore, MemorySessionStore};

    #[test]
    fn register_then_unregister_prunes_entry() {
        let directory = SessionDirectory::new();

        directory.register("user@example.com", "s1");
        assert_eq!(directory.identity_count(), 1);

        directory.unregister("user@example.com", "s1");
        assert_eq!(directory.identity_count(), 0);
    }

    #[test]
    fn register_is_idempotent() {
        let directory = SessionDirectory::new();

        directory.register("user@example.com", "s1");
        directory.register("user@example.com", "s1");

        assert_eq!(directory.sessions_for("user@example.com").len(), 1);
    }

    #[test]
    fn empty_arguments_are_no_ops() {
        let directory = SessionDirectory::new();

        directory.register("", "s1");
        directory.register("user@example.com", "");
        directory.unregister("", "s1");

        assert_eq!(directory.identity_count(), 0);
    }

    #[test]
    fn identity_is_case_insensitive() {
        let directory = SessionDirectory::new();

        directory.register("Foo@Bar.com", "s1");

        assert_eq!(directory.sessions_for("foo@bar.com").len(), 1);
        directory.unregister("FOO@bar.COM", "s1");
        assert_eq!(directory.identity_count(), 0);
    }

    #[tokio::test]
    async fn destroy_all_counts_and_clears() {
        let directory = SessionDirectory::new();
        let store = MemorySessionStore::new();

        let mut ids = Vec::new();
        for _ in 0..3 {
            let record = SessionRecord::new(Principal::from_email("user@example.com"));
            ids.push(record.id.clone());
            directory.register("user@example.com", &record.id);
            store.insert(record).await.unwrap();
        }

        let destroyed = directory
            .destroy_all_for_identity(&store, "USER@example.com")
            .await;

        assert_eq!(destroyed, 3);
        assert_eq!(directory.identity_count(), 0);
        for id in &ids {
            assert!(store.get(id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn destroy_all_unknown_identity_returns_zero() {
        let directory = SessionDirectory::new();
        let store = MemorySessionStore::new();

        let destroyed = directory
            .destroy_all_for_identity(&store, "nobody@example.com")
            .await;

        assert_eq!(destroyed, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn destroy_all_counts_despite_store_failures() {
        let directory = SessionDirectory::new();
        let store = FailingDestroyStore {
            inner: MemorySessionStore::new(),
        };

        directory.register("user@example.com", "s1");
        directory.register("user@example.com", "s2");

        let destroyed = directory
            .destroy_all_for_identity(&store, "user@example.com")
            .await;

        // Bookkeeping is authoritative even when the store refuses.
        assert_eq!(destroyed, 2);
        assert_eq!(directory.identity_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_registrations_lose_no_updates() {
        let directory = Arc::new(SessionDirectory::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let directory = Arc::clone(&directory);
            handles.push(tokio::spawn(async move {
                directory.register("user@example.com", &format!("s{i}"));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(directory.sessions_for("user@example.com").len(), 16);
    }
}
