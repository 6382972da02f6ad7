//! Environment-driven configuration for the task store.
//!
//! Values are read once at startup and passed explicitly to the components
//! that need them.

use std::time::Duration;
use thiserror::Error;

/// Primary variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TASKLIST_DATABASE_URL";
/// Fallback variable for the connection URL.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Variable holding the maximum connection pool size.
pub const POOL_SIZE_VAR: &str = "TASKLIST_POOL_SIZE";
/// Variable holding the scheduled purge interval in seconds.
pub const PURGE_INTERVAL_VAR: &str = "TASKLIST_PURGE_INTERVAL_SECS";

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_PURGE_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No connection URL was provided.
    #[error("missing database URL: set TASKLIST_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    /// A variable was present but could not be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value read from the environment.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Runtime configuration for the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    pool_size: u32,
    purge_interval: Duration,
}

impl StoreConfig {
    /// Creates a configuration with default pool size and purge interval.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            purge_interval: Duration::from_secs(DEFAULT_PURGE_INTERVAL_SECS),
        }
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a numeric
    /// setting is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a numeric
    /// setting is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .or_else(|| lookup(FALLBACK_DATABASE_URL_VAR))
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let pool_size = parse_positive(POOL_SIZE_VAR, lookup(POOL_SIZE_VAR))?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let purge_secs = parse_positive(PURGE_INTERVAL_VAR, lookup(PURGE_INTERVAL_VAR))?
            .unwrap_or(DEFAULT_PURGE_INTERVAL_SECS);

        Ok(Self {
            database_url,
            pool_size,
            purge_interval: Duration::from_secs(purge_secs),
        })
    }

    /// Sets the maximum connection pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Returns the `PostgreSQL` connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum connection pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the scheduled purge interval.
    #[must_use]
    pub const fn purge_interval(&self) -> Duration {
        self.purge_interval
    }
}

fn parse_positive<T>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let Some(value) = raw else {
        return Ok(None);
    };
    let parsed = value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            value: value.clone(),
            reason: "expected an unsigned integer",
        })?;
    if parsed == T::default() {
        return Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(Some(parsed))
}
