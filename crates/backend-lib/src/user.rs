// ============================
// backend-lib/src/user.rs
// ============================
//! The user entity: identity, credential and embedded refresh sessions.
use crate::auth::Session;
use serde::{Deserialize, Serialize};
use taskmanager_common::UserView;
use uuid::Uuid;

pub type UserId = Uuid;

/// Stored user document.
///
/// This is the persisted shape and carries the password hash and sessions.
/// Anything leaving the server goes through [`UserView`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    pub(crate) password_hash: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl User {
    /// New user with a fresh id and no credential yet.
    ///
    /// The credential store must set the password before the user is stored.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_string(),
            password_hash: String::new(),
            sessions: Vec::new(),
        }
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// The session carrying exactly `refresh_token`, if any
    pub fn session(&self, refresh_token: &str) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|session| session.refresh_token == refresh_token)
    }

    /// External representation without the hash or sessions
    pub fn serialize_for_client(&self) -> UserView {
        UserView::from(self)
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        UserView {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
