use tracing::{error, info, instrument};

use crate::{Gateway, Reading, StoreError};

// ---

/// Point read at an exact timestamp.
///
/// Two phases. The existence probe comes first: if a row is already stored
/// at `timestamp` the call fails with [`StoreError::AlreadyExists`], which is
/// how callers ask "has this been recorded yet". Otherwise the row is
/// fetched; finding nothing yields [`Reading::default`] and no error. Only
/// store faults are errors here.
///
/// The two phases are separate statements, so a row written between them is
/// returned by the fetch.
#[instrument(skip(gateway))]
pub async fn get_reading(
    gateway: &Gateway,
    sensor: &str,
    timestamp: i64,
) -> Result<Reading, StoreError> {
    // ---
    let mut conn = gateway.open(sensor).await?;
    let table = conn.table();

    let probe = format!("SELECT 1 FROM {} WHERE date = ?", table);
    let existing: Option<i64> = sqlx::query_scalar(&probe)
        .bind(timestamp)
        .fetch_optional(&mut *conn)
        .await
        .inspect_err(|e| error!("Existence probe failed: {}", e))?;

    if existing.is_some() {
        info!("Reading already recorded");
        return Err(StoreError::AlreadyExists {
            sensor: table.name().to_string(),
            timestamp,
        });
    }

    let fetch = format!("SELECT date, temp, hr FROM {} WHERE date = ?", table);
    let reading: Option<Reading> = sqlx::query_as(&fetch)
        .bind(timestamp)
        .fetch_optional(&mut *conn)
        .await
        .inspect_err(|e| error!("Fetch failed: {}", e))?;

    Ok(reading.unwrap_or_default())
}
