//! PostgreSQL connection settings.
//!
//! # Environment Variables
//!
//! - `PG_ASYNC_DSN`: connection string (falls back to `DATABASE_URL`)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 5)
//! - `DB_ACQUIRE_TIMEOUT_SECS`: how long a request waits for a connection (default: 5)
//!
//! SQLAlchemy-style driver suffixes (`postgresql+asyncpg://`) are accepted
//! and stripped, so existing dotenv files keep working.

use std::time::Duration;

use crate::error::ConfigError;
use crate::vars::{Lookup, optional, parse_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let url = optional(lookup, "PG_ASYNC_DSN")
            .or_else(|| optional(lookup, "DATABASE_URL"))
            .ok_or(ConfigError::Missing("PG_ASYNC_DSN"))?;

        Ok(Self {
            url: normalize_dsn(&url),
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse_or(lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?),
        })
    }
}

/// Drops a `+driver` suffix from the URL scheme.
fn normalize_dsn(dsn: &str) -> String {
    match dsn.split_once("://") {
        Some((scheme, rest)) => match scheme.split_once('+') {
            Some((base, _driver)) => format!("{base}://{rest}"),
            None => dsn.to_string(),
        },
        None => dsn.to_string(),
    }
}
