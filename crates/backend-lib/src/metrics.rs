// ============================
// crates/backend-lib/src/metrics.rs
// ============================

//! Central place for metric keys
pub const SIGNUP: &str = "auth.signup";
pub const LOGIN: &str = "auth.login";
pub const LOGIN_FAILED: &str = "auth.login_failed";
pub const SESSION_CREATED: &str = "session.created";
pub const ACCESS_TOKEN_ISSUED: &str = "access_token.issued";
pub const GUARD_REJECTED: &str = "guard.rejected";
