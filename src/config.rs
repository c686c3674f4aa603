//! Settings for the demo runner, read from an optional TOML file.
//!
//! Every field has a default, so a missing or empty file is valid:
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [singleton]
//! log_file = "log.txt"
//!
//! [chain]
//! route = "/api/key"
//! rate_limit = 3
//! ```

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging;

pub const DEFAULT_CONFIG_FILE: &str = "patterns.toml";
pub const LOG_LEVEL_ENV: &str = "PATTERNS_LOG_LEVEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub logging: LoggingConfig,
    pub singleton: SingletonConfig,
    pub decorator: DecoratorConfig,
    pub chain: ChainConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SingletonConfig {
    pub log_file: PathBuf,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        SingletonConfig {
            log_file: env::temp_dir().join("patterns-singleton.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoratorConfig {
    pub file: PathBuf,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        DecoratorConfig {
            file: env::temp_dir().join("patterns-decorator.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    pub method: String,
    pub route: String,
    pub cookie_key: String,
    pub cookie_value: String,
    pub api_tokens: Vec<String>,
    pub rate_limit: u32,
    pub required_fields: Vec<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            method: "GET".to_string(),
            route: "/api/key".to_string(),
            cookie_key: "KEY".to_string(),
            cookie_value: "Pa$$w0rd".to_string(),
            api_tokens: vec!["s3cr3t".to_string()],
            rate_limit: 2,
            required_fields: vec!["name".to_string()],
        }
    }
}

impl CatalogConfig {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: CatalogConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] if present, or the defaults.
    /// `PATTERNS_LOG_LEVEL` overrides the configured log level.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => CatalogConfig::default(),
        };
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            config.logging.level = level;
            config.validate()?;
        }
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        logging::parse_level(&self.logging.level).map_err(|e| ConfigError::InvalidValue {
            field: "logging.level",
            reason: e.to_string(),
        })?;

        if self.chain.rate_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chain.rate_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.chain.route.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "chain.route",
                reason: format!("'{}' must start with '/'", self.chain.route),
            });
        }
        if self.chain.route.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "chain.route",
                reason: format!("'{}' must not contain whitespace", self.chain.route),
            });
        }
        // Same grammar the request line parser accepts.
        let method = &self.chain.method;
        if method.len() < 2 || !method.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidValue {
                field: "chain.method",
                reason: format!("'{method}' must be two or more uppercase letters"),
            });
        }
        Ok(())
    }
}
