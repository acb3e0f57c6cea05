//! Validation failure taxonomy.
//!
//! The caller only ever sees a generic unauthorized response; these
//! variants exist so the handler can log the precise reason and
//! distinguish expiry in its response body without leaking verification
//! internals.

use thiserror::Error;

/// Ways a revocation token can fail validation.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Token could not be parsed at all.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// No usable signing key for the token's key id.
    #[error("signing key not found: {0}")]
    KeyNotFound(String),

    /// Signature verification failed.
    #[error("invalid token signature")]
    SignatureInvalid,

    /// Token expired beyond the clock-skew tolerance.
    #[error("token has expired")]
    Expired,

    /// Token not yet valid beyond the clock-skew tolerance.
    #[error("token not yet valid")]
    NotYetValid,

    /// Issuer claim does not match the expected issuer.
    #[error("issuer mismatch")]
    IssuerMismatch,

    /// Audience claim does not contain the expected audience.
    #[error("audience mismatch")]
    AudienceMismatch,
}

impl ValidationError {
    /// Checks if this error indicates an expired token.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Result type for token validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
