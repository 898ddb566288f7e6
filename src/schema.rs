//! Database schema management for `tempura-db`.
//!
//! Ensures one table per registered sensor exists before the store is used.
//! Applied once on startup from `main.rs`.

use sqlx::SqlitePool;
use tracing::info;

use crate::{SchemaRegistry, StoreError};

// ---

/// Create the sensor tables (idempotent).
///
/// Each registered sensor gets `date INTEGER PRIMARY KEY, temp REAL, hr REAL`.
/// With `reset` set, existing sensor tables are dropped first and all stored
/// readings are lost. Runs in a single transaction; errors are propagated.
pub async fn create_schema(
    pool: &SqlitePool,
    registry: &SchemaRegistry,
    reset: bool,
) -> Result<(), StoreError> {
    // ---
    let mut tx = pool.begin().await?;

    for table in registry.tables() {
        if reset {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&mut *tx)
                .await?;
            info!("Dropped table {}", table.name());
        }

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                date INTEGER NOT NULL PRIMARY KEY,
                temp REAL,
                hr   REAL
            );
            "#,
            table
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!("Schema ready for {} sensor table(s)", registry.len());
    Ok(())
}
