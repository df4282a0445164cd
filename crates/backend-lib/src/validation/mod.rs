// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Signup and login input validation.

use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;
use taskmanager_common::Credentials;
use thiserror::Error;

const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Validate an email address, returning it trimmed
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address is required".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a new password
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult<&str> {
    let length = password.chars().count();

    if length < min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {min_length} characters"
        )));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}

/// Validate signup input, returning the trimmed email
pub fn validate_signup(credentials: &Credentials, min_length: usize) -> ValidationResult<&str> {
    let email = validate_email(&credentials.email)?;
    validate_password(&credentials.password, min_length)?;
    Ok(email)
}

/// Validate login input, returning the trimmed email.
///
/// Only presence is checked; a malformed email simply fails to match a user.
pub fn validate_login(credentials: &Credentials) -> ValidationResult<&str> {
    let email = credentials.email.trim();
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address is required".to_string(),
        ));
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password is required".to_string(),
        ));
    }
    Ok(email)
}
