//! Environment-driven retry configuration
//!
//! | Variable              | Default |
//! |-----------------------|---------|
//! | `RETRY_MAX_ATTEMPTS`  | 3       |
//! | `RETRY_BASE_DELAY_MS` | 1000    |

use crate::retry::RetryConfig;
use std::env::VarError;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const MAX_ATTEMPTS_ENV: &str = "RETRY_MAX_ATTEMPTS";
pub const BASE_DELAY_MS_ENV: &str = "RETRY_BASE_DELAY_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Parse an environment variable with a default fallback
///
/// Missing variables yield `default`; present but unparsable or non-UTF-8 ones are an error.
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

impl RetryConfig {
    /// Load from `RETRY_MAX_ATTEMPTS` and `RETRY_BASE_DELAY_MS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            max_attempts: parse_env_with_default(MAX_ATTEMPTS_ENV, defaults.max_attempts)?,
            base_delay: Duration::from_millis(parse_env_with_default(
                BASE_DELAY_MS_ENV,
                defaults.base_delay.as_millis() as u64,
            )?),
        };

        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}
