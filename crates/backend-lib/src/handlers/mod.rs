//! HTTP handlers owned by the auth core.
pub mod users;
