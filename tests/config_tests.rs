#![allow(clippy::unwrap_used)]

use marketing_bot::config::Config;
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

fn set_required_vars() {
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("OWNER_ID", "42");
    env::set_var("API_USER", "admin");
    env::set_var("API_PASSWORD", "hunter2");
    env::set_var("SECRET_KEY", "signing-secret");
}

fn clear_all_vars() {
    for name in [
        "TELEGRAM_BOT_TOKEN",
        "OWNER_ID",
        "API_USER",
        "API_PASSWORD",
        "SECRET_KEY",
        "DATA_DIR",
        "HTTP_PORT",
    ] {
        env::remove_var(name);
    }
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();
    env::set_var("DATA_DIR", "/tmp/bot-data");
    env::set_var("HTTP_PORT", "8080");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.owner_id, 42);
    assert_eq!(config.data_dir.to_string_lossy(), "/tmp/bot-data");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.api_user, "admin");
    assert_eq!(config.api_password, "hunter2");
    assert_eq!(config.jwt_secret, "signing-secret");

    clear_all_vars();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();

    let config = Config::from_env().unwrap();

    assert_eq!(config.data_dir.to_string_lossy(), "./data");
    assert_eq!(config.http_port, 3000);

    clear_all_vars();
}

#[test]
fn test_config_missing_required_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();
    env::remove_var("TELEGRAM_BOT_TOKEN");

    assert!(Config::from_env().is_err());

    clear_all_vars();
}

#[test]
fn test_config_rejects_non_numeric_owner_id() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();
    env::set_var("OWNER_ID", "not-a-number");

    assert!(Config::from_env().is_err());

    clear_all_vars();
}

#[test]
fn test_config_rejects_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_all_vars();

    set_required_vars();
    env::set_var("HTTP_PORT", "not-a-port");

    assert!(Config::from_env().is_err());

    clear_all_vars();
}
