// ==========================
// tests/unit/config_tests.rs
// ==========================
//! Unit tests for the configuration module
use backend_lib::config::{Settings, MIN_SECRET_LENGTH};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.storage.path, PathBuf::from("data"));
    assert_eq!(settings.auth.access_token_ttl_secs, 15 * 60);
    assert_eq!(settings.auth.session_ttl_secs, 10 * 24 * 60 * 60);
    assert_eq!(settings.password.min_length, 8);
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_default_settings_need_a_secret() {
    // There is no default signing secret
    assert!(Settings::default().validate().is_err());

    let mut settings = Settings::default();
    settings.auth.jwt_secret = "s".repeat(MIN_SECRET_LENGTH);
    assert!(settings.validate().is_ok());

    settings.auth.jwt_secret = "s".repeat(MIN_SECRET_LENGTH - 1);
    assert!(settings.validate().is_err());
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config_content = r#"
        [server]
        host = "0.0.0.0"
        port = 8888

        [storage]
        path = "test_data"

        [auth]
        jwt_secret = "file-secret-file-secret-file-secret"
        access_token_ttl_secs = 60
    "#;
    fs::write(&config_path, config_content).unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8888);
    assert_eq!(settings.storage.path, PathBuf::from("test_data"));
    assert_eq!(settings.auth.access_token_ttl_secs, 60);
    // Unset keys keep their defaults
    assert_eq!(settings.auth.session_ttl_secs, 864_000);
    assert!(settings.validate().is_ok());
    assert_eq!(settings.bind_addr().unwrap().port(), 8888);
}

#[test]
fn test_load_from_missing_file_fails() {
    let temp_dir = tempdir().unwrap();
    assert!(Settings::load_from(temp_dir.path().join("absent.toml")).is_err());
}
