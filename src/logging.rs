//! Logging initialisation via tracing-subscriber.
//!
//! Diagnostics go to stderr so demo output on stdout stays readable.

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoggingError {
    #[error("Log level must not be empty")]
    EmptyLevel,

    #[error("Unrecognised log level: '{0}'")]
    UnknownLevel(String),

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Validate a level string (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    if level.trim().is_empty() {
        return Err(LoggingError::EmptyLevel);
    }
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnknownLevel(level.to_string()))
}

/// Install the global subscriber. `RUST_LOG`, when set and valid, wins over
/// `level`.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let fallback = parse_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_levels_parse() {
        for level in ["error", "warn", "info", "debug", "trace", "off", " INFO "] {
            assert!(parse_level(level).is_ok(), "expected '{level}' to be valid");
        }
        assert_eq!(parse_level("debug"), Ok(LevelFilter::DEBUG));
    }

    #[test]
    fn test_invalid_levels_rejected() {
        assert_eq!(parse_level(""), Err(LoggingError::EmptyLevel));
        assert_eq!(
            parse_level("verbose"),
            Err(LoggingError::UnknownLevel("verbose".to_string()))
        );
    }

    #[test]
    fn test_init_twice_reports_install_error() {
        // Another test in this process may have installed one already.
        let _ = init("info");
        assert!(matches!(init("info"), Err(LoggingError::Install(_))));
    }
}
