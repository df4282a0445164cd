// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between the task manager client and server.
//! This module defines the auth wire contract: header names and JSON bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Request header carrying the signed access token
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Request and response header carrying the opaque refresh token
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Request header carrying the claimed user identifier
pub const USER_ID_HEADER: &str = "_id";

/// Signup and login request body
/// # Fields
/// * `email` - Login handle, trimmed by the server
/// * `password` - Plaintext password, never echoed back
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// External representation of a user.
///
/// This is the only user shape that crosses the wire; it has no field for
/// the password hash or the session list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
}

/// Body returned by `GET /users/me/access-token`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenBody {
    pub access_token: String,
}
