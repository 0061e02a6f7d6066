//! Runtime configuration for the sync engine.
//!
//! Values are read from environment variables, falling back to defaults for
//! unset or blank keys. A `.env` file in the working directory or one of its
//! parents is loaded first; variables already set in the process win.

use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::sync::domain::HistoryLog;

/// Environment key enabling the periodic scheduler.
pub const AUTO_SYNC_ENABLED_KEY: &str = "AUTO_SYNC_ENABLED";
/// Environment key holding the scheduler interval in seconds.
pub const SYNC_INTERVAL_SECONDS_KEY: &str = "SYNC_INTERVAL_SECONDS";
/// Environment key holding the number of retained history entries.
pub const SYNC_HISTORY_CAPACITY_KEY: &str = "SYNC_HISTORY_CAPACITY";

const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(300);

/// Errors returned while reading configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean key holds an unrecognised value.
    #[error("{key} must be true or false, got '{value}'")]
    InvalidFlag {
        /// Offending key.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// A numeric key does not hold a non-negative integer.
    #[error("{key} must be a whole number, got '{value}'")]
    InvalidNumber {
        /// Offending key.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// A numeric key that must be positive is zero.
    #[error("{key} must be greater than zero")]
    Zero {
        /// Offending key.
        key: &'static str,
    },
}

/// Settings for the orchestrator and the scheduler.
///
/// # Examples
///
/// ```
/// use task_sync::config::SyncConfig;
///
/// let config = SyncConfig::from_lookup(|key| match key {
///     "AUTO_SYNC_ENABLED" => Some("true".to_owned()),
///     "SYNC_INTERVAL_SECONDS" => Some("60".to_owned()),
///     _ => None,
/// })
/// .expect("valid configuration");
/// assert!(config.auto_sync_enabled);
/// assert_eq!(config.sync_interval.as_secs(), 60);
/// assert_eq!(config.history_capacity.get(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Whether the periodic scheduler runs.
    pub auto_sync_enabled: bool,
    /// Time between scheduled cycles.
    pub sync_interval: Duration,
    /// Number of history entries retained.
    pub history_capacity: NonZeroUsize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            auto_sync_enabled: false,
            sync_interval: DEFAULT_SYNC_INTERVAL,
            history_capacity: HistoryLog::DEFAULT_CAPACITY,
        }
    }
}

impl SyncConfig {
    /// Reads the configuration from the process environment after loading
    /// any `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set key holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_file();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a key to its raw
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set key holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        };

        let auto_sync_enabled = match read(AUTO_SYNC_ENABLED_KEY) {
            Some((key, value)) => parse_flag(key, &value)?,
            None => defaults.auto_sync_enabled,
        };
        let sync_interval = match read(SYNC_INTERVAL_SECONDS_KEY) {
            Some((key, value)) => Duration::from_secs(parse_positive(key, &value)?),
            None => defaults.sync_interval,
        };
        let history_capacity = match read(SYNC_HISTORY_CAPACITY_KEY) {
            Some((key, value)) => {
                let capacity = usize::try_from(parse_positive(key, &value)?)
                    .map_err(|_| ConfigError::InvalidNumber { key, value })?;
                NonZeroUsize::new(capacity).ok_or(ConfigError::Zero { key })?
            }
            None => defaults.history_capacity,
        };

        Ok(Self {
            auto_sync_enabled,
            sync_interval,
            history_capacity,
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_owned(),
        }),
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    let parsed = value.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_owned(),
    })?;
    if parsed == 0 {
        return Err(ConfigError::Zero { key });
    }
    Ok(parsed)
}

/// Loads the nearest `.env` file into the process environment.
///
/// Variables already present in the environment are not replaced. A file
/// that cannot be parsed is logged and skipped.
fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
    }
}
