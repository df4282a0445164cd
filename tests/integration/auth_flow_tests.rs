// ==================================
// tests/integration/auth_flow_tests.rs
// ==================================
//! Signup and login over HTTP
use crate::test_utils::{body_json, header_str, post_json, send, setup_test_app};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use backend_lib::storage::Storage;
use serde_json::json;
use taskmanager_common::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use uuid::Uuid;

#[tokio::test]
async fn test_signup_returns_tokens_and_safe_body() {
    let (state, app, _clock, _temp_dir) = setup_test_app();

    let response = send(
        &app,
        post_json("/users", &json!({"email": "a@x.com", "password": "longenough1"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let access = header_str(&response, ACCESS_TOKEN_HEADER).expect("access token header");
    let refresh = header_str(&response, REFRESH_TOKEN_HEADER).expect("refresh token header");

    let body = body_json(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("sessions").is_none());

    let user_id: Uuid = body["_id"].as_str().unwrap().parse().unwrap();
    assert_eq!(state.auth.verify_access_token(&access).unwrap(), user_id);

    let stored = state.storage.find_user_by_id(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.sessions.len(), 1);
    assert_eq!(stored.sessions[0].refresh_token, refresh);
}

#[tokio::test]
async fn test_duplicate_signup_is_bad_request() {
    let (_state, app, _clock, _temp_dir) = setup_test_app();
    let body = json!({"email": "a@x.com", "password": "longenough1"});

    assert_eq!(send(&app, post_json("/users", &body)).await.status(), StatusCode::OK);

    let second = send(&app, post_json("/users", &body)).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert!(header_str(&second, ACCESS_TOKEN_HEADER).is_none());
    assert_eq!(body_json(second).await["error"]["code"], "VAL_002");
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let (_state, app, _clock, _temp_dir) = setup_test_app();

    for body in [
        json!({"email": "a@x.com", "password": "short"}),
        json!({"email": "", "password": "longenough1"}),
        json!({"email": "not-an-email", "password": "longenough1"}),
        json!({"password": "longenough1"}),
    ] {
        let response = send(&app, post_json("/users", &body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (_state, app, _clock, _temp_dir) = setup_test_app();

    let request = Request::post("/users/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VAL_001");
}

#[tokio::test]
async fn test_login_opens_a_new_session() {
    let (state, app, _clock, _temp_dir) = setup_test_app();
    let credentials = json!({"email": "a@x.com", "password": "longenough1"});
    let signup = send(&app, post_json("/users", &credentials)).await;
    let signup_refresh = header_str(&signup, REFRESH_TOKEN_HEADER).unwrap();

    let login = send(&app, post_json("/users/login", &credentials)).await;
    assert_eq!(login.status(), StatusCode::OK);
    let login_refresh = header_str(&login, REFRESH_TOKEN_HEADER).unwrap();
    assert!(header_str(&login, ACCESS_TOKEN_HEADER).is_some());
    assert_ne!(signup_refresh, login_refresh);

    let body = body_json(login).await;
    assert!(body.get("sessions").is_none());
    let user_id: Uuid = body["_id"].as_str().unwrap().parse().unwrap();
    let stored = state.storage.find_user_by_id(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.sessions.len(), 2);
}

#[tokio::test]
async fn test_login_failures_share_one_response() {
    let (_state, app, _clock, _temp_dir) = setup_test_app();
    send(
        &app,
        post_json("/users", &json!({"email": "a@x.com", "password": "longenough1"})),
    )
    .await;

    let wrong_password = send(
        &app,
        post_json("/users/login", &json!({"email": "a@x.com", "password": "longenough2"})),
    )
    .await;
    let unknown_email = send(
        &app,
        post_json("/users/login", &json!({"email": "b@x.com", "password": "longenough1"})),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    assert!(header_str(&wrong_password, REFRESH_TOKEN_HEADER).is_none());
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
}

#[tokio::test]
async fn test_validation_errors_say_what_is_wrong() {
    let (_state, app, _clock, _temp_dir) = setup_test_app();

    let short = send(
        &app,
        post_json("/users", &json!({"email": "a@x.com", "password": "short"})),
    )
    .await;
    let missing = send(
        &app,
        post_json("/users", &json!({"email": "", "password": "longenough1"})),
    )
    .await;

    let short_message = body_json(short).await["error"]["message"].as_str().unwrap().to_string();
    let missing_message = body_json(missing).await["error"]["message"].as_str().unwrap().to_string();
    assert!(short_message.contains("at least 8 characters"), "{short_message}");
    assert!(missing_message.contains("Email address is required"), "{missing_message}");
}
