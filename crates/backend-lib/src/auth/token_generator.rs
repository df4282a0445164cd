// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
//! Secure token generation for refresh sessions.
//!
//! Values are opaque and only ever compared for equality.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Refresh token size in bytes (64 bytes = 512 bits of entropy)
pub const REFRESH_TOKEN_BYTES: usize = 64;

/** Generate a refresh token value
# Returns
A base64 URL-safe encoded string without padding, safe to carry in a header */
pub fn generate_refresh_token() -> String {
    generate_secure_token_with_size(REFRESH_TOKEN_BYTES)
}

/** Generate a cryptographically secure random token with specified size
# Arguments
* `bytes` - The size of the random token in bytes
# Returns
A base64 URL-safe encoded string without padding */
pub fn generate_secure_token_with_size(bytes: usize) -> String {
    let mut buffer = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
