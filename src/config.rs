//! Configuration loader for the `tempura-db` store.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The sensor list is parsed here once and handed to
//! the [`SchemaRegistry`](crate::SchemaRegistry) explicitly; nothing else in
//! the crate reads the environment.
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional boolean environment variable with a default value.
macro_rules! parse_env_bool {
    ($var_name:expr, $default:expr) => {
        match env::var($var_name).ok().as_deref() {
            None => $default,
            Some(v) => parse_bool(v).ok_or_else(|| anyhow!("Invalid {}: {:?}", $var_name, v))?,
        }
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

const DEFAULT_DB_URL: &str = "sqlite://data.db";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// SQLite connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// Sensor identifiers, one table each.
    pub sensors: Vec<String>,

    /// Drop and recreate sensor tables on bootstrap.
    pub schema_reset: bool,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `TEMPURA_SENSORS` – comma-separated sensor identifiers
///
/// Optional:
/// - `DATABASE_URL` – SQLite connection string (default: `sqlite://data.db`)
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `TEMPURA_SCHEMA_RESET` – drop existing sensor tables first (default: false)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let sensors = parse_sensor_list(&require_env!("TEMPURA_SENSORS"));
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string());
    let db_pool_max = parse_env_u32!("DB_POOL_MAX", 5);
    let schema_reset = parse_env_bool!("TEMPURA_SCHEMA_RESET", false);

    if db_pool_max == 0 {
        return Err(anyhow!("DB_POOL_MAX must be at least 1"));
    }

    Ok(Config {
        db_url,
        db_pool_max,
        sensors,
        schema_reset,
    })
}

/// Split a comma-separated sensor list, trimming entries and dropping blanks.
pub fn parse_sensor_list(raw: &str) -> Vec<String> {
    // ---
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Accepts `1|true|yes` and `0|false|no`, case-insensitively.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL         : {}", self.db_url);
        tracing::info!("  DB_POOL_MAX          : {}", self.db_pool_max);
        tracing::info!("  TEMPURA_SENSORS      : {}", self.sensors.join(","));
        tracing::info!("  TEMPURA_SCHEMA_RESET : {}", self.schema_reset);
    }
}
