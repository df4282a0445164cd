// ============================
// backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are scrypt PHC strings (`$scrypt$ln=..,r=..,p=..$salt$hash`), so the
//! work factor a hash was made with travels with it and verification keeps
//! working after the configured factor changes.
use crate::error::AppError;
use crate::user::User;
use rand::RngCore;
use scrypt::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use zeroize::Zeroize;

/// Salt size in bytes
const SALT_BYTES: usize = 16;

/// Derived key length in bytes
const HASH_LEN: usize = 32;

/// Hash a password using scrypt with the given parameters.
///
/// The plaintext is zeroized before returning.
pub fn hash_password(mut plain: String, params: Params) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Failed to encode salt: {e}")))?;

    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")));
    plain.zeroize();
    hash
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Owns hashing and verification of a user's credential.
///
/// Hashing runs on the blocking pool so a slow work factor never stalls the
/// async executor.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    params: Params,
}

impl CredentialStore {
    /// Create a store hashing with `2^log_n` scrypt cost
    pub fn new(log_n: u8) -> Result<Self, AppError> {
        let params = Params::new(log_n, 8, 1, HASH_LEN)
            .map_err(|e| AppError::Internal(format!("Invalid scrypt parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Hash `plaintext` and store it as the user's credential.
    ///
    /// Call only when the plaintext is new; stored users are never re-hashed.
    pub async fn set_password(&self, user: &mut User, plaintext: String) -> Result<(), AppError> {
        let params = self.params.clone();
        let hash = tokio::task::spawn_blocking(move || hash_password(plaintext, params)).await??;
        user.password_hash = hash;
        Ok(())
    }

    /// Compare `plaintext` with the user's stored hash.
    ///
    /// A mismatch and an unusable hash both yield `false`.
    pub async fn verify_password(&self, user: &User, plaintext: &str) -> bool {
        let hash = user.password_hash.clone();
        let mut plain = plaintext.to_owned();
        tokio::task::spawn_blocking(move || {
            let ok = verify_password(&hash, &plain);
            plain.zeroize();
            ok
        })
        .await
        .unwrap_or(false)
    }
}
