//! Step-up authentication freshness.
//!
//! A session that recently completed a second-factor check carries an
//! elevated-assurance marker. The marker is trusted only inside a fixed
//! window measured on the local process clock; no skew allowance is
//! applied because both the write and the read happen on the same clock.

use chrono::{Duration, Utc};

use crate::record::SessionRecord;

/// Default freshness window: five minutes.
pub const DEFAULT_WINDOW_SECS: i64 = 300;

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The marker is present and inside the window.
    Fresh,
    /// The marker is absent or the window has elapsed.
    Stale,
}

impl Freshness {
    /// Checks a session's elevated-assurance marker against a window.
    ///
    /// Fresh iff the marker is set and strictly less than `window_secs`
    /// have elapsed since it was stamped: a marker aged exactly the
    /// window length is already stale. Checking never extends the
    /// window.
    #[must_use]
    pub fn check(record: &SessionRecord, window_secs: i64) -> Self {
        if !record.mfa_verified {
            return Self::Stale;
        }
        let Some(verified_at) = record.mfa_verified_at else {
            return Self::Stale;
        };

        if Utc::now() - verified_at < Duration::seconds(window_secs) {
            Self::Fresh
        } else {
            Self::Stale
        }
    }

    /// Checks against the default five-minute window.
    #[must_use]
    pub fn check_default(record: &SessionRecord) -> Self {
        Self::check(record, DEFAULT_WINDOW_SECS)
    }

    /// Whether this outcome permits the sensitive operation.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh)
    }
}
