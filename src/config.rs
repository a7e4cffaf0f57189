//! Store configuration read from the environment.
//!
//! Required:
//!   `GTD_DATABASE_URL`            `PostgreSQL` connection string
//!
//! Optional:
//!   `GTD_DB_POOL_SIZE`            maximum pooled connections, default 8
//!   `GTD_DB_CONNECT_TIMEOUT_SECS` pool checkout timeout, default 30

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use thiserror::Error;

use crate::workflow::adapters::postgres::GtdPgPool;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "GTD_DATABASE_URL";
/// Environment variable holding the pool size.
pub const POOL_SIZE_VAR: &str = "GTD_DB_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "GTD_DB_CONNECT_TIMEOUT_SECS";

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value for {var}: {value}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_max_size: u32,
    /// How long a pool checkout may wait.
    pub connection_timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_max_size: DEFAULT_POOL_SIZE,
            connection_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or a numeric setting
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or a numeric setting
    /// does not parse or is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let pool_max_size =
            parse_positive(&lookup, POOL_SIZE_VAR)?.unwrap_or(DEFAULT_POOL_SIZE);
        let timeout_secs = parse_positive(&lookup, CONNECT_TIMEOUT_VAR)?
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        Ok(Self {
            database_url,
            pool_max_size,
            connection_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds an r2d2 pool for the `PostgreSQL` store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<GtdPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.database_url);
        Ok(Pool::builder()
            .max_size(self.pool_max_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?)
    }
}

fn parse_positive<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr + PartialEq + From<u8>,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::from(0) => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}
