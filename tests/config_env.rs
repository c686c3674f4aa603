//! Environment overrides get their own test binary: the variable is
//! process-wide and must not leak into unrelated tests.

use design_patterns::config::{CatalogConfig, ConfigError, LOG_LEVEL_ENV};
use std::env;
use std::fs;

fn with_log_level<R>(value: &str, f: impl FnOnce() -> R) -> R {
    let previous = env::var(LOG_LEVEL_ENV).ok();
    env::set_var(LOG_LEVEL_ENV, value);
    let result = f();
    match previous {
        Some(previous) => env::set_var(LOG_LEVEL_ENV, previous),
        None => env::remove_var(LOG_LEVEL_ENV),
    }
    result
}

#[test]
fn test_log_level_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("patterns.toml");
    fs::write(&config_path, "[logging]\nlevel = \"info\"\n").unwrap();

    let config = with_log_level("debug", || CatalogConfig::load(Some(&config_path))).unwrap();
    assert_eq!(config.logging.level, "debug");

    let config = with_log_level("trace", || CatalogConfig::load(None)).unwrap();
    assert_eq!(config.logging.level, "trace");

    let err = with_log_level("chatty", || CatalogConfig::load(None)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "logging.level", .. }));

    env::remove_var(LOG_LEVEL_ENV);
    let config = CatalogConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.logging.level, "info");
}
