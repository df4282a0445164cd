// ==========================
// tests/unit/error_tests.rs
// ==========================
use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use backend_lib::error::AppError;
use serde_json::Value;

async fn render(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_client_errors_are_bad_request() {
    for error in [
        AppError::Validation("Email address is required".to_string()),
        AppError::EmailTaken,
        AppError::InvalidCredentials,
    ] {
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["code"].is_string());
    }
}

#[tokio::test]
async fn test_guard_failures_are_unauthorized_and_opaque() {
    let (status, invalid) = render(AppError::InvalidToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, expired) = render(AppError::ExpiredToken).await;
    assert_eq!(invalid, expired);

    let (status, not_found) = render(AppError::SessionNotFound).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, session_expired) = render(AppError::SessionExpired).await;
    assert_eq!(not_found, session_expired);
}

#[tokio::test]
async fn test_server_errors_hide_as_internal() {
    let (status, body) = render(AppError::Signing("bad key".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "SIGN_001");

    let (status, body) = render(AppError::Persistence("disk full".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DB_001");
}

#[tokio::test]
async fn test_validation_detail_is_always_rendered() {
    let (status, body) = render(AppError::Validation("Email address is required".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Email address is required"));
}
