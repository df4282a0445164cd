// crates/backend-lib/src/middleware/mod.rs

//! Request guards for protected routes.

pub mod auth;

pub use auth::{require_access_token, require_valid_session};
