//! # granite-server
//!
//! Axum server for the Granite Bank demo application.
//!
//! The interesting machinery lives in two places: the global token
//! revocation endpoint, which lets the identity authority force-logout a
//! user across all their sessions, and the step-up gate, which requires a
//! fresh second-factor check before sensitive account operations. The
//! rest of the surface (login, logout, transfer) is deliberately thin -
//! primary authentication and business validation are delegated to
//! external collaborators.
//!
//! ## Usage
//!
//! ```ignore
//! use granite_server::{config::ServerConfig, router, state::AppState};
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::from_config(config);
//! let app = router::create_router(state);
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session_cookie;
pub mod state;
