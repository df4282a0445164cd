use super::Session;
use crate::error::AppError;
use crate::user::{User, UserId};
use async_trait::async_trait;
use taskmanager_common::Credentials;

/// Both tokens handed out by a successful signup or login
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful signup or login
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Identity attached to a request by the access guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// User and matched session attached to a request by the refresh-session guard
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: User,
    pub session: Session,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a user and open their first session
    async fn signup(&self, credentials: Credentials) -> Result<AuthOutcome, AppError>;
    /// Check credentials and open a new session
    async fn login(&self, credentials: Credentials) -> Result<AuthOutcome, AppError>;
    fn issue_access_token(&self, user_id: &UserId) -> Result<String, AppError>;
    /// Stateless check used by the access guard
    fn verify_access_token(&self, token: &str) -> Result<UserId, AppError>;
    /// Stateful check used by the refresh-session guard
    async fn validate_session(
        &self,
        user_id: &str,
        refresh_token: &str,
    ) -> Result<SessionContext, AppError>;
}
