// ============================
// backend-lib/src/auth/session.rs
// ============================
//! Refresh sessions embedded in the user document.
//!
//! A session goes from created to expired as the clock passes `expires_at`.
//! Nothing removes it afterwards and there is no revocation: a user's session
//! list only grows.
use super::clock::Clock;
use super::token_generator::generate_refresh_token;
use crate::error::AppError;
use crate::metrics;
use crate::storage::Storage;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// One outstanding refresh grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub refresh_token: String,
    /// Seconds since the epoch
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired(&self, now: i64) -> bool {
        is_expired(self, now)
    }
}

/// A session is expired once `now` reaches `expires_at`
pub fn is_expired(session: &Session, now: i64) -> bool {
    session.expires_at <= now
}

/// Session manager for refresh tokens
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Create and persist a new session for `user`, returning its refresh token.
    ///
    /// `user.sessions` is only extended once the store has accepted the write.
    pub async fn create_session(&self, user: &mut User) -> Result<String, AppError> {
        let session = Session {
            refresh_token: generate_refresh_token(),
            expires_at: self.clock.now().saturating_add(self.ttl_secs),
        };

        self.storage.append_session(&user.id, &session).await?;
        ::metrics::counter!(metrics::SESSION_CREATED).increment(1);

        let refresh_token = session.refresh_token.clone();
        user.sessions.push(session);
        Ok(refresh_token)
    }

    /// Find the user with id `user_id` owning a session for `refresh_token`.
    ///
    /// An unparseable id, an unknown id and an unknown token all give `None`.
    pub async fn find_user_by_session_token(
        &self,
        user_id: &str,
        refresh_token: &str,
    ) -> Result<Option<User>, AppError> {
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        self.storage
            .find_user_by_session_token(&id, refresh_token)
            .await
    }

    /// Whether `session` has expired on this store's clock
    pub fn is_expired(&self, session: &Session) -> bool {
        session.is_expired(self.clock.now())
    }
}
