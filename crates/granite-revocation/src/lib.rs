//! # granite-revocation
//!
//! Validation of externally-signed revocation tokens for the Granite
//! Bank demo application.
//!
//! An identity authority notifies the application that a user's sessions
//! must be invalidated by calling the revocation endpoint with a signed
//! bearer token. This crate verifies that token - signature against a
//! remotely-fetched, cached public-key set selected by the `kid` header,
//! plus issuer, audience, expiry and not-before with a fixed clock-skew
//! tolerance - and parses the subject identifier naming whose sessions to
//! destroy.
//!
//! ## Modules
//!
//! - [`claims`] - the claim set consumed from a revocation token
//! - [`jwks`] - JSON Web Key types and the cached remote key set
//! - [`subject`] - subject identifier parsing (`email` / `iss_sub`)
//! - [`validator`] - the token validation pipeline
//! - [`error`] - validation failure taxonomy

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claims;
pub mod error;
pub mod jwks;
pub mod subject;
pub mod validator;

pub use claims::{Audience, RevocationClaims};
pub use error::{ValidationError, ValidationResult};
pub use jwks::{Jwk, JwkSet, RemoteKeySet};
pub use subject::{RawSubjectId, SubjectError, SubjectId};
pub use validator::RevocationTokenValidator;
