use super::{
    AuthOutcome, AuthService, AuthTokens, Clock, CredentialStore, SessionContext, SessionStore,
    TokenIssuer,
};
use crate::config::Settings;
use crate::error::AppError;
use crate::metrics::{ACCESS_TOKEN_ISSUED, LOGIN, LOGIN_FAILED, SIGNUP};
use crate::storage::Storage;
use crate::user::{User, UserId};
use crate::validation;
use async_trait::async_trait;
use ::metrics::counter;
use std::sync::Arc;
use taskmanager_common::Credentials;

/// Default auth pipeline over a storage backend.
///
/// Every flow is a straight sequence of steps sharing `AppError`: validate,
/// touch the credential, persist a session, then sign the access token.
#[derive(Debug)]
pub struct DefaultAuth<S> {
    storage: S,
    credentials: CredentialStore,
    sessions: SessionStore<S>,
    tokens: TokenIssuer,
    min_password_length: usize,
}

impl<S: Storage + Clone> DefaultAuth<S> {
    pub fn new(storage: S, settings: &Settings, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        Ok(Self {
            credentials: CredentialStore::new(settings.auth.scrypt_log_n)?,
            sessions: SessionStore::new(
                storage.clone(),
                settings.auth.session_ttl_secs,
                clock.clone(),
            ),
            tokens: TokenIssuer::from_settings(&settings.auth, clock),
            min_password_length: settings.password.min_length,
            storage,
        })
    }

    /// Open a session, then sign an access token for it
    async fn issue_tokens(&self, mut user: User) -> Result<AuthOutcome, AppError> {
        let refresh_token = self.sessions.create_session(&mut user).await?;
        let access_token = self.issue_access_token(&user.id)?;
        Ok(AuthOutcome {
            user,
            tokens: AuthTokens {
                access_token,
                refresh_token,
            },
        })
    }
}

#[async_trait]
impl<S: Storage + Clone> AuthService for DefaultAuth<S> {
    async fn signup(&self, credentials: Credentials) -> Result<AuthOutcome, AppError> {
        let email = validation::validate_signup(&credentials, self.min_password_length)?;
        let mut user = User::new(email);

        self.credentials
            .set_password(&mut user, credentials.password)
            .await?;
        self.storage.insert_user(&user).await?;
        counter!(SIGNUP).increment(1);

        self.issue_tokens(user).await
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthOutcome, AppError> {
        let email = validation::validate_login(&credentials)?;

        let user = match self.storage.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                counter!(LOGIN_FAILED).increment(1);
                tracing::debug!("login for unknown email");
                return Err(AppError::InvalidCredentials);
            },
        };

        if !self
            .credentials
            .verify_password(&user, &credentials.password)
            .await
        {
            counter!(LOGIN_FAILED).increment(1);
            tracing::debug!(user_id = %user.id, "login with wrong password");
            return Err(AppError::InvalidCredentials);
        }
        counter!(LOGIN).increment(1);

        self.issue_tokens(user).await
    }

    fn issue_access_token(&self, user_id: &UserId) -> Result<String, AppError> {
        let token = self.tokens.issue_access_token(user_id)?;
        counter!(ACCESS_TOKEN_ISSUED).increment(1);
        Ok(token)
    }

    fn verify_access_token(&self, token: &str) -> Result<UserId, AppError> {
        self.tokens.verify_access_token(token)
    }

    async fn validate_session(
        &self,
        user_id: &str,
        refresh_token: &str,
    ) -> Result<SessionContext, AppError> {
        let user = self
            .sessions
            .find_user_by_session_token(user_id, refresh_token)
            .await?
            .ok_or(AppError::SessionNotFound)?;

        let session = user
            .session(refresh_token)
            .cloned()
            .ok_or(AppError::SessionNotFound)?;

        // Expired sessions stay in the user's list
        if self.sessions.is_expired(&session) {
            return Err(AppError::SessionExpired);
        }

        Ok(SessionContext { user, session })
    }
}
