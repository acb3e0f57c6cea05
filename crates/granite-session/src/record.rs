//! Session record model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::principal::Principal;

/// A server-side session record.
///
/// Owned exclusively by the [`SessionStore`](crate::store::SessionStore);
/// the directory and scanner only ever hold session ids. Carries the
/// authenticated principal and the elevated-assurance marker consumed by
/// the step-up gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier, opaque to everything but the store.
    pub id: String,

    /// The authenticated principal this session belongs to.
    pub principal: Principal,

    /// Whether a step-up (second factor) check has been completed.
    pub mfa_verified: bool,

    /// When the step-up check was completed.
    ///
    /// The marker never self-extends: every sensitive access re-checks
    /// elapsed time against this timestamp, it does not reset it.
    pub mfa_verified_at: Option<DateTime<Utc>>,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// Session notes (key-value pairs for flow state).
    pub notes: HashMap<String, String>,
}

impl SessionRecord {
    /// Creates a new session record with a fresh id.
    #[must_use]
    pub fn new(principal: Principal) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            principal,
            mfa_verified: false,
            mfa_verified_at: None,
            created_at: Utc::now(),
            notes: HashMap::new(),
        }
    }

    /// Stamps the elevated-assurance marker.
    ///
    /// This is the only way freshness is established; callers invoke it
    /// from the step-up completion flow and nowhere else.
    pub fn mark_step_up_verified(&mut self) {
        self.mfa_verified = true;
        self.mfa_verified_at = Some(Utc::now());
    }

    /// Sets a session note.
    pub fn set_note(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.notes.insert(key.into(), value.into());
    }

    /// Gets a session note.
    #[must_use]
    pub fn get_note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    /// Removes a session note, returning its value.
    pub fn remove_note(&mut self, key: &str) -> Option<String> {
        self.notes.remove(key)
    }
}

/// Well-known session note keys.
pub mod notes {
    /// Original destination recorded before a step-up redirect, so the
    /// re-authentication flow can resume there on success.
    pub const RETURN_TO: &str = "STEP_UP_RETURN_TO";
}
