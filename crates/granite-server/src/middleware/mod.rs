//! Request middleware.

pub mod step_up;

pub use step_up::require_step_up;
