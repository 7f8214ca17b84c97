//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides. Config::from_env() also loads a .env file
//! via dotenvy when one is present, so these tests focus on override behavior.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use askdiary::config::{Config, LogFormat, MAX_DEBOUNCE_MS};
use askdiary::AppError;
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_config_from_env_loads_successfully() {
    let result = Config::from_env();
    assert!(result.is_ok(), "Config::from_env() should work without any key");
}

#[test]
#[serial]
fn test_config_from_env_custom_provider() {
    env::set_var("DEEPSEEK_BASE_URL", "https://proxy.example.com/v1");
    env::set_var("DEEPSEEK_MODEL", "deepseek-reasoner");
    env::set_var("GENERATION_TEMPERATURE", "1.2");
    env::set_var("GENERATION_MAX_TOKENS", "800");

    let config = Config::from_env().unwrap();
    assert_eq!(config.provider.base_url, "https://proxy.example.com/v1");
    assert_eq!(config.provider.model, "deepseek-reasoner");
    assert_eq!(config.provider.temperature, 1.2);
    assert_eq!(config.provider.max_tokens, 800);

    env::remove_var("DEEPSEEK_BASE_URL");
    env::remove_var("DEEPSEEK_MODEL");
    env::remove_var("GENERATION_TEMPERATURE");
    env::remove_var("GENERATION_MAX_TOKENS");
}

#[test]
#[serial]
fn test_config_from_env_custom_database() {
    env::set_var("DATABASE_PATH", "/custom/path.db");
    env::set_var("DATABASE_MAX_CONNECTIONS", "10");

    let config = Config::from_env().unwrap();
    assert_eq!(config.database.path.to_str().unwrap(), "/custom/path.db");
    assert_eq!(config.database.max_connections, 10);

    env::remove_var("DATABASE_PATH");
    env::remove_var("DATABASE_MAX_CONNECTIONS");
}

#[test]
#[serial]
fn test_config_from_env_json_log_format() {
    env::set_var("LOG_FORMAT", "JSON");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);

    env::remove_var("LOG_FORMAT");
}

#[test]
#[serial]
fn test_config_from_env_log_level() {
    env::set_var("LOG_LEVEL", "debug");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.level, "debug");

    env::remove_var("LOG_LEVEL");
}

#[test]
#[serial]
fn test_config_from_env_custom_timeouts_and_debounce() {
    env::set_var("GENERATE_TIMEOUT_MS", "60000");
    env::set_var("VALIDATE_TIMEOUT_MS", "2000");
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "250");

    let config = Config::from_env().unwrap();
    assert_eq!(config.request.generate_timeout_ms, 60000);
    assert_eq!(config.request.validate_timeout_ms, 2000);
    assert_eq!(config.session.debounce_ms, 250);

    env::remove_var("GENERATE_TIMEOUT_MS");
    env::remove_var("VALIDATE_TIMEOUT_MS");
    env::remove_var("AUTOSAVE_DEBOUNCE_MS");
}

#[test]
#[serial]
fn test_config_invalid_number_uses_default() {
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "soon");

    let config = Config::from_env().unwrap();
    assert_eq!(config.session.debounce_ms, 500);

    env::remove_var("AUTOSAVE_DEBOUNCE_MS");
}

#[test]
#[serial]
fn test_config_rejects_out_of_range_temperature() {
    env::set_var("GENERATION_TEMPERATURE", "3.5");

    let result = Config::from_env();
    assert!(matches!(result, Err(AppError::Config { .. })));

    env::remove_var("GENERATION_TEMPERATURE");
}

#[test]
#[serial]
fn test_config_rejects_empty_base_url() {
    env::set_var("DEEPSEEK_BASE_URL", "");

    let result = Config::from_env();
    assert!(matches!(result, Err(AppError::Config { .. })));

    env::remove_var("DEEPSEEK_BASE_URL");
}

#[test]
#[serial]
fn test_config_rejects_oversized_debounce() {
    env::set_var("AUTOSAVE_DEBOUNCE_MS", "10000000000000000");

    let result = Config::from_env();
    assert!(matches!(result, Err(AppError::Config { .. })));

    env::set_var("AUTOSAVE_DEBOUNCE_MS", MAX_DEBOUNCE_MS.to_string());
    let config = Config::from_env().unwrap();
    assert_eq!(config.session.debounce_ms, MAX_DEBOUNCE_MS);

    env::remove_var("AUTOSAVE_DEBOUNCE_MS");
}
