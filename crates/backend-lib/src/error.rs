// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid access token")]
    InvalidToken,

    #[error("Access token expired")]
    ExpiredToken,

    #[error("No session matches the refresh token")]
    SessionNotFound,

    #[error("Refresh session expired")]
    SessionExpired,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::EmailTaken | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            },
            AppError::InvalidToken
            | AppError::ExpiredToken
            | AppError::SessionNotFound
            | AppError::SessionExpired => StatusCode::UNAUTHORIZED,
            AppError::Persistence(_) | AppError::Signing(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error.
    ///
    /// Paired guard failures share a code so clients cannot tell them apart.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::EmailTaken => "VAL_002",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::InvalidToken | AppError::ExpiredToken => "AUTH_002",
            AppError::SessionNotFound | AppError::SessionExpired => "AUTH_003",
            AppError::Persistence(_) => "DB_001",
            AppError::Signing(_) => "SIGN_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Invalid input provided".to_string(),
            AppError::EmailTaken => "Email already registered".to_string(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::InvalidToken | AppError::ExpiredToken => {
                "Invalid or expired access token".to_string()
            },
            AppError::SessionNotFound | AppError::SessionExpired => {
                "Refresh token has expired or the session is invalid".to_string()
            },
            AppError::Persistence(_) | AppError::Signing(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }

    /// Whether the detailed message may be shown to clients in development builds
    fn reveals_detail(&self) -> bool {
        matches!(
            self,
            AppError::Persistence(_) | AppError::Signing(_) | AppError::Internal(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Validation detail always reaches the client, auth failures never do,
        // server faults only in development
        let message = match self {
            AppError::Validation(_) => self.to_string(),
            _ if cfg!(debug_assertions) && self.reveals_detail() => self.to_string(),
            _ => self.sanitized_message(),
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Background task failed: {err}"))
    }
}
