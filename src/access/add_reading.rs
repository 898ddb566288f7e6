use sqlx::Connection;
use tracing::{debug, error, instrument};

use crate::{Gateway, StoreError};

// ---

/// Insert one reading into the sensor's table.
///
/// Runs as a single transaction. A failed insert is rolled back and its
/// error returned as-is; a duplicate timestamp is rejected by the primary key
/// and surfaces as [`StoreError::Store`], not `AlreadyExists`. If the future
/// is dropped or panics mid-flight the uncommitted transaction is rolled back
/// when it goes out of scope.
#[instrument(skip(gateway))]
pub async fn add_reading(
    gateway: &Gateway,
    sensor: &str,
    timestamp: i64,
    temperature: f64,
    humidity: f64,
) -> Result<(), StoreError> {
    // ---
    let mut conn = gateway.open(sensor).await?;
    let sql = format!(
        "INSERT INTO {}(date, temp, hr) VALUES (?, ?, ?)",
        conn.table()
    );

    let mut tx = conn.begin().await.inspect_err(|e| {
        error!("Failed to start transaction: {}", e);
    })?;

    let inserted = sqlx::query(&sql)
        .bind(timestamp)
        .bind(temperature)
        .bind(humidity)
        .execute(&mut *tx)
        .await;

    if let Err(e) = inserted {
        error!("Insert failed: {}", e);
        if let Err(rollback) = tx.rollback().await {
            error!("Rollback failed: {}", rollback);
        }
        return Err(e.into());
    }

    tx.commit().await.inspect_err(|e| {
        error!("Commit failed: {}", e);
    })?;

    debug!("Stored reading");
    Ok(())
}
