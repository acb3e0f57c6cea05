//! Subject identifier parsing.
//!
//! The revocation request body names whose sessions to destroy using a
//! `sub_id` object with a `format` discriminator, in one of two shapes:
//!
//! - `{"format": "email", "email": "..."}`
//! - `{"format": "iss_sub", "iss": "...", "sub": "..."}`
//!
//! Anything else - an unrecognized format, or a recognized format with a
//! missing field - is a malformed request, and the error names the
//! offending format.

use serde::Deserialize;
use thiserror::Error;

/// Subject identifier format names accepted by the endpoint.
pub const SUPPORTED_FORMATS: &[&str] = &["email", "iss_sub"];

/// A `sub_id` object as it arrives on the wire, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubjectId {
    /// Format discriminator.
    pub format: String,

    /// Email address (`email` format).
    #[serde(default)]
    pub email: Option<String>,

    /// Issuer (`iss_sub` format).
    #[serde(default)]
    pub iss: Option<String>,

    /// Subject (`iss_sub` format).
    #[serde(default)]
    pub sub: Option<String>,
}

/// A validated subject identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectId {
    /// Identified by email address.
    Email {
        /// The email address.
        email: String,
    },
    /// Identified by issuer + subject pair.
    IssSub {
        /// The issuer.
        iss: String,
        /// The subject within that issuer.
        sub: String,
    },
}

impl SubjectId {
    /// Validates a raw `sub_id` object.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::UnsupportedFormat`] for an unrecognized
    /// format and [`SubjectError::MissingField`] for a recognized format
    /// with an empty or absent required field.
    pub fn parse(raw: RawSubjectId) -> Result<Self, SubjectError> {
        fn require(
            value: Option<String>,
            format: &str,
            field: &'static str,
        ) -> Result<String, SubjectError> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(SubjectError::MissingField {
                    format: format.to_string(),
                    field,
                }),
            }
        }

        match raw.format.as_str() {
            "email" => Ok(Self::Email {
                email: require(raw.email, "email", "email")?,
            }),
            "iss_sub" => Ok(Self::IssSub {
                iss: require(raw.iss, "iss_sub", "iss")?,
                sub: require(raw.sub, "iss_sub", "sub")?,
            }),
            other => Err(SubjectError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Composite directory key for an issuer+subject pair: `iss|sub`.
    ///
    /// A distinct key space from email; the two are never reconciled.
    #[must_use]
    pub fn composite_key(&self) -> String {
        match self {
            Self::Email { email } => email.to_lowercase(),
            Self::IssSub { iss, sub } => format!("{iss}|{sub}"),
        }
    }
}

/// Errors from subject identifier validation.
#[derive(Debug, Clone, Error)]
pub enum SubjectError {
    /// The `format` value is not one this endpoint supports.
    #[error("unrecognized subject identifier format: {0}")]
    UnsupportedFormat(String),

    /// A required field for the declared format is empty or absent.
    #[error("subject identifier format '{format}' is missing required field '{field}'")]
    MissingField {
        /// The declared format.
        format: String,
        /// The missing field.
        field: &'static str,
    },
}
