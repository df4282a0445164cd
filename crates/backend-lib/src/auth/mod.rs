// ============================
// backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.
//!
//! Dual-token scheme: short-lived signed access tokens verified without any
//! lookup, and long-lived opaque refresh tokens stored as sessions on the user.
pub mod access_token;
pub mod clock;
pub mod password;
mod service;
mod service_impl;
pub mod session;
pub mod token_generator;

pub use access_token::{AccessClaims, TokenIssuer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use password::{hash_password, verify_password, CredentialStore};
pub use service::{AuthOutcome, AuthService, AuthTokens, AuthenticatedUser, SessionContext};
pub use service_impl::DefaultAuth;
pub use session::{is_expired, Session, SessionStore};
pub use token_generator::generate_refresh_token;
