//! Revocation token claim types.

use serde::{Deserialize, Serialize};

/// Audience claim: a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience value.
    Single(String),
    /// Multiple audience values.
    Multiple(Vec<String>),
}

impl Audience {
    /// Checks whether the audience contains a specific value.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(s) => s == value,
            Self::Multiple(values) => values.iter().any(|s| s == value),
        }
    }
}

/// The claim set consumed from a revocation token.
///
/// Validated and discarded per request; the application holds no
/// long-term copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationClaims {
    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: Audience,

    /// Expiration time (Unix seconds).
    pub exp: i64,

    /// Not-before time (Unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issued-at time (Unix seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Token identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Subject of the token itself (not the revocation target; the
    /// target arrives in the request body).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}
