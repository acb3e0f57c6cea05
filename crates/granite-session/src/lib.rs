//! # granite-session
//!
//! Session management for the Granite Bank demo application.
//!
//! This crate owns the server side of session bookkeeping:
//!
//! - [`SessionStore`] - the storage contract that actually owns session
//!   records, plus the in-memory [`MemorySessionStore`] implementation
//! - [`SessionDirectory`] - a fast-path index from normalized user
//!   identity to the set of active session ids for that user
//! - [`scan`] - a full-store fallback scanner that re-derives the same
//!   answer from store contents when the directory may be incomplete
//! - [`stepup`] - the time-boxed second-factor freshness check
//!
//! The directory is an optimization, never the sole source of truth:
//! it lives in process memory and is lost on restart, so revocation
//! always pairs a directory pass with a store scan.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod directory;
pub mod error;
pub mod principal;
pub mod record;
pub mod scan;
pub mod stepup;
pub mod store;

pub use directory::SessionDirectory;
pub use error::{SessionError, SessionResult};
pub use principal::Principal;
pub use record::SessionRecord;
pub use scan::{scan_and_destroy, SessionMatcher};
pub use stepup::Freshness;
pub use store::{MemorySessionStore, SessionStore};
