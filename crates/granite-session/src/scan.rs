//! Full-store fallback scanner.
//!
//! Registration can race with login flows across restarts, so the
//! directory may miss sessions the store still holds. The scanner
//! re-derives the user → sessions answer from store contents and is the
//! only resolution path for issuer+subject identifiers, which the
//! email-keyed directory cannot answer.

use crate::error::SessionResult;
use crate::record::SessionRecord;
use crate::store::SessionStore;

/// Predicate selecting which sessions a revocation applies to.
#[derive(Debug, Clone)]
pub enum SessionMatcher {
    /// Match any email-bearing principal field, case-insensitively.
    Email(String),
    /// Match the principal's subject identifier exactly.
    Subject(String),
}

impl SessionMatcher {
    /// Checks whether a record's principal matches.
    #[must_use]
    pub fn matches(&self, record: &SessionRecord) -> bool {
        match self {
            Self::Email(email) => record.principal.matches_email(email),
            Self::Subject(sub) => record.principal.matches_sub(sub),
        }
    }
}

/// Enumerates the store and destroys every matching session.
///
/// Records that fail the matcher (including those with empty principals)
/// are skipped. Individual destroy failures are logged and swallowed so a
/// partial failure never aborts the batch; matched sessions are counted
/// regardless, since destroy is idempotent at the store. Returns the
/// match count.
///
/// # Errors
///
/// Fails only when the store enumeration itself fails.
pub async fn scan_and_destroy(
    store: &dyn SessionStore,
    matcher: &SessionMatcher,
) -> SessionResult<u64> {
    let sessions = store.all().await?;

    let mut destroyed = 0;
    for (session_id, record) in &sessions {
        if !matcher.matches(record) {
            continue;
        }
        if let Err(err) = store.destroy(session_id).await {
            tracing::warn!(
                session_id = %session_id,
                error = %err,
                "store destroy failed during scan; continuing"
            );
        }
        tracing::info!(session_id = %session_id, "session destroyed by store scan");
        destroyed += 1;
    }
    Ok(destroyed)
}
