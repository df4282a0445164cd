// ============================
// backend-lib/src/auth/access_token.rs
// ============================
//! Access token issuing and verification.
//!
//! Access tokens are HS256 JWTs carrying the user id as `_id`. They have no
//! server-side record: verification is signature plus expiry, nothing else.
use super::clock::Clock;
use super::token_generator::generate_refresh_token;
use crate::config::AuthSettings;
use crate::error::AppError;
use crate::user::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(rename = "_id")]
    pub user_id: UserId,
    pub iat: i64,
    pub exp: i64,
    /// Makes two tokens minted in the same second distinct
    pub jti: Uuid,
}

/// Mints and verifies the two bearer credential types.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        // Expiry is checked against our own clock so that `exp == now` is expired
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
            clock,
        }
    }

    pub fn from_settings(auth: &AuthSettings, clock: Arc<dyn Clock>) -> Self {
        Self::new(auth.jwt_secret.as_bytes(), auth.access_token_ttl_secs, clock)
    }

    /// Sign an access token for `user_id`
    pub fn issue_access_token(&self, user_id: &UserId) -> Result<String, AppError> {
        let now = self.clock.now();
        let claims = AccessClaims {
            user_id: *user_id,
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
            jti: Uuid::new_v4(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Signing(e.to_string()))
    }

    /// Fresh opaque refresh token value; persisting it is the session store's job
    pub fn issue_refresh_token_value(&self) -> String {
        generate_refresh_token()
    }

    /// Check signature and expiry, returning the embedded user id
    pub fn verify_access_token(&self, token: &str) -> Result<UserId, AppError> {
        let claims = decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| AppError::InvalidToken)?
            .claims;
        if claims.exp <= self.clock.now() {
            return Err(AppError::ExpiredToken);
        }
        Ok(claims.user_id)
    }
}
