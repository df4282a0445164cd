// ==========================
// tests/unit/session_tests.rs
// ==========================
//! Session store over flat-file storage
use backend_lib::auth::{CredentialStore, ManualClock, SessionStore};
use backend_lib::storage::{FlatFileStorage, Storage};
use backend_lib::user::User;
use std::sync::Arc;
use tempfile::TempDir;

const TEN_DAYS: u64 = 10 * 24 * 60 * 60;

async fn stored_user(storage: &FlatFileStorage) -> User {
    let mut user = User::new("a@x.com");
    CredentialStore::new(4)
        .unwrap()
        .set_password(&mut user, "longenough1".to_string())
        .await
        .unwrap();
    storage.insert_user(&user).await.unwrap();
    user
}

#[tokio::test]
async fn test_sessions_accumulate_and_keep_the_credential() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FlatFileStorage::new(temp_dir.path()).unwrap();
    let clock = Arc::new(ManualClock::new(0));
    let store = SessionStore::new(storage.clone(), TEN_DAYS, clock.clone());
    let mut user = stored_user(&storage).await;
    let hash = user.password_hash().to_string();

    let first = store.create_session(&mut user).await.unwrap();
    clock.advance(TEN_DAYS as i64);
    let second = store.create_session(&mut user).await.unwrap();

    let stored = storage.find_user_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.sessions.len(), 2);
    assert_eq!(stored.password_hash(), hash);

    // The first session is past its lifetime but still listed
    assert!(store.is_expired(stored.session(&first).unwrap()));
    assert!(!store.is_expired(stored.session(&second).unwrap()));
}

#[tokio::test]
async fn test_concurrent_logins_keep_every_session() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FlatFileStorage::new(temp_dir.path()).unwrap();
    let store = SessionStore::new(storage.clone(), TEN_DAYS, Arc::new(ManualClock::new(0)));
    let user = stored_user(&storage).await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let store = store.clone();
        let mut snapshot = user.clone();
        handles.push(tokio::spawn(async move {
            store.create_session(&mut snapshot).await
        }));
    }
    let mut tokens = Vec::new();
    for handle in handles {
        tokens.push(handle.await.unwrap().unwrap());
    }

    let stored = storage.find_user_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.sessions.len(), 6);
    for token in &tokens {
        assert!(stored.session(token).is_some());
    }
}
