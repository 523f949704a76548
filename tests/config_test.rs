//! Tests for config loading

use santa_draw::config::DrawConfig;
use serial_test::serial;
use std::io::Write;

const ENV_VARS: [&str; 4] = [
    "SANTA_DRAW_MAX_ATTEMPTS",
    "SANTA_DRAW_SEED",
    "SANTA_DRAW_LOG_LEVEL",
    "SANTA_DRAW_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = DrawConfig::from_env().unwrap();
    assert_eq!(config, DrawConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("SANTA_DRAW_MAX_ATTEMPTS", "42");
    std::env::set_var("SANTA_DRAW_SEED", "7");
    std::env::set_var("SANTA_DRAW_LOG_FORMAT", "json");

    let config = DrawConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.max_attempts, 42);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_rejects_garbage() {
    clear_env();
    std::env::set_var("SANTA_DRAW_SEED", "not-a-number");
    let result = DrawConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("SANTA_DRAW_SEED"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
max_attempts = 100
seed = 2024

[logging]
level = "debug"
format = "json"
"#
    )
    .unwrap();

    let config = DrawConfig::from_file(file.path()).unwrap();
    assert_eq!(config.max_attempts, 100);
    assert_eq!(config.seed, Some(2024));
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_missing() {
    let err = DrawConfig::from_file(std::path::Path::new("/nonexistent/santa.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_from_file_invalid_toml() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "max_attempts = \"lots\"").unwrap();

    let err = DrawConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
