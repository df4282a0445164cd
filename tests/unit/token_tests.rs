// ==========================
// tests/unit/token_tests.rs
// ==========================
use crate::test_utils::tamper_signature;
use backend_lib::auth::{ManualClock, TokenIssuer};
use backend_lib::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

const SECRET: &[u8] = b"token-tests-secret-token-tests-secret";

#[test]
fn test_tampered_signature_is_invalid() {
    let issuer = TokenIssuer::new(SECRET, 900, Arc::new(ManualClock::new(1_000)));
    let token = issuer.issue_access_token(&Uuid::new_v4()).unwrap();

    let tampered = tamper_signature(&token);
    assert_ne!(tampered, token);
    assert!(matches!(
        issuer.verify_access_token(&tampered),
        Err(AppError::InvalidToken)
    ));
}

#[test]
fn test_garbage_is_invalid() {
    let issuer = TokenIssuer::new(SECRET, 900, Arc::new(ManualClock::new(1_000)));
    for token in ["", "abc", "a.b.c"] {
        assert!(matches!(
            issuer.verify_access_token(token),
            Err(AppError::InvalidToken)
        ));
    }
}

#[test]
fn test_other_secret_is_invalid() {
    let clock = Arc::new(ManualClock::new(1_000));
    let issuer = TokenIssuer::new(SECRET, 900, clock.clone());
    let rotated = TokenIssuer::new(b"rotated-secret-rotated-secret-rotated", 900, clock);

    let token = issuer.issue_access_token(&Uuid::new_v4()).unwrap();
    assert!(matches!(
        rotated.verify_access_token(&token),
        Err(AppError::InvalidToken)
    ));
}

#[test]
fn test_access_token_expires_after_fifteen_minutes() {
    let clock = Arc::new(ManualClock::new(1_000));
    let issuer = TokenIssuer::new(SECRET, 15 * 60, clock.clone());
    let user_id = Uuid::new_v4();
    let token = issuer.issue_access_token(&user_id).unwrap();

    clock.advance(15 * 60 - 1);
    assert_eq!(issuer.verify_access_token(&token).unwrap(), user_id);

    clock.advance(1);
    assert!(matches!(
        issuer.verify_access_token(&token),
        Err(AppError::ExpiredToken)
    ));
}

#[test]
fn test_refresh_token_values_are_opaque_and_unique() {
    let issuer = TokenIssuer::new(SECRET, 900, Arc::new(ManualClock::new(0)));
    let first = issuer.issue_refresh_token_value();
    let second = issuer.issue_refresh_token_value();

    assert_ne!(first, second);
    assert_eq!(first.len(), 86);
}
