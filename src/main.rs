//! Bootstrap entry point for the `tempura-db` reading store.
//!
//! This binary prepares the store that the data-access library serves:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Opening the SQLite connection pool (creating the file if needed)
//! - Creating one table per configured sensor if it does not exist
//! - Reporting the newest stored reading of every sensor
//!
//! # Environment Variables
//! - `TEMPURA_SENSORS` (**required**) – comma-separated sensor identifiers
//! - `DATABASE_URL` (optional) – SQLite connection string (default: `sqlite://data.db`)
//! - `DB_POOL_MAX` (optional) – maximum number of DB connections (default: 5)
//! - `TEMPURA_SCHEMA_RESET` (optional) – drop existing sensor tables first
//! - `TEMPURA_LOG_LEVEL` / `TEMPURA_DEBUG` (optional) – log verbosity
//! - `TEMPURA_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, io::IsTerminal, num::NonZeroU32, str::FromStr};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use tempura_db::{config, get_dataset, schema, Gateway, Limit, SchemaRegistry};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let registry = SchemaRegistry::new(&cfg.sensors).context("Invalid TEMPURA_SENSORS")?;

    tracing::info!("Attempting to open database: {}", cfg.db_url);

    let options = SqliteConnectOptions::from_str(&cfg.db_url)
        .with_context(|| format!("Invalid DATABASE_URL '{}'", cfg.db_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.db_pool_max)
        .connect_with(options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database '{}': {}", cfg.db_url, e))?;

    tracing::info!("Successfully opened database");

    schema::create_schema(&pool, &registry, cfg.schema_reset).await?;

    let gateway = Gateway::new(pool.clone(), registry);
    report_latest(&gateway).await?;

    pool.close().await;
    Ok(())
}

// ---

/// Log the newest reading stored for each registered sensor.
async fn report_latest(gateway: &Gateway) -> Result<()> {
    // ---
    let newest = Limit::Count(NonZeroU32::MIN);

    for table in gateway.registry().tables() {
        // A bucket width of 1ms matches every row
        let dataset = get_dataset(gateway, table.name(), 1, 0, newest).await?;

        match dataset.latest() {
            Some(reading) => tracing::info!(
                "{}: latest reading at {} ({}) temp={} hr={}",
                table.name(),
                reading.timestamp,
                reading
                    .recorded_at()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "out of range".into()),
                reading.temperature,
                reading.humidity
            ),
            None => tracing::info!("{}: no readings stored", table.name()),
        }
    }

    Ok(())
}

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `TEMPURA_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level from `RUST_LOG`, else `TEMPURA_LOG_LEVEL`, else `debug` when
///   `TEMPURA_DEBUG=true`, else `info`
///
/// This should be called once at startup before any logging or tracing
/// macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("TEMPURA_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    // Determine if we should use colors
    let use_color = env::var("FORCE_COLOR")
        .ok()
        .and_then(|v| config::parse_bool(&v))
        .unwrap_or_else(|| std::io::stdout().is_terminal());

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let debug = env::var("TEMPURA_DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let level = match env::var("TEMPURA_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ if debug => "debug",
            _ => "info",
        };
        EnvFilter::new(format!("{level},sqlx::query=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
