use std::num::NonZeroU32;

use futures::TryStreamExt;
use tracing::{debug, error, instrument};

use crate::{Dataset, Gateway, Reading, StoreError};

// ---

/// Native sampling period of the loggers, in epoch milliseconds (5 minutes).
pub const BASELINE_SAMPLE_INTERVAL_MS: i64 = 5 * 60 * 1000;

/// Row selection mode for [`get_dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    // ---
    /// At most this many of the newest matching rows.
    Count(NonZeroU32),

    /// Every matching row. Output buffers are pre-sized from the table's row
    /// count, but the estimate never caps the result.
    Decimated,
}

/// Integer form used by callers: `-1` is decimated, positive is a count.
impl TryFrom<i64> for Limit {
    type Error = StoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        // ---
        if value == -1 {
            return Ok(Limit::Decimated);
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Limit::Count)
            .ok_or_else(|| {
                StoreError::InvalidArgument(format!("limit must be -1 or positive, got {}", value))
            })
    }
}

/// Expected number of decimated rows for a table of `total_rows` readings.
///
/// Assumes one reading per [`BASELINE_SAMPLE_INTERVAL_MS`]; buckets narrower
/// than that count as one sample each.
pub fn estimate_capacity(total_rows: i64, bucket_width: i64) -> usize {
    // ---
    let samples_per_bucket = (bucket_width / BASELINE_SAMPLE_INTERVAL_MS).max(1);
    let estimate = total_rows.max(0) / samples_per_bucket + 1;
    usize::try_from(estimate).unwrap_or(usize::MAX)
}

/// Buffer size for a fixed-count read: never more rows than the table holds.
fn reserved_for_count(limit: NonZeroU32, total_rows: i64) -> usize {
    // ---
    let total = usize::try_from(total_rows.max(0)).unwrap_or(usize::MAX);
    usize::try_from(limit.get()).map_or(total, |n| n.min(total))
}

/// Range read with time-bucket decimation.
///
/// Keeps only rows whose timestamp falls in the same phase as
/// `reference_time` modulo `bucket_width`, i.e. one sample per bucket,
/// ordered newest first. Phases are Euclidean remainders, so a negative
/// reference or timestamp lands in the same class as its positive
/// congruent, for any positive width up to `i64::MAX`.
///
/// Any store failure aborts the call; a partial dataset is never returned.
#[instrument(skip(gateway))]
pub async fn get_dataset(
    gateway: &Gateway,
    sensor: &str,
    bucket_width: i64,
    reference_time: i64,
    limit: Limit,
) -> Result<Dataset, StoreError> {
    // ---
    // Unknown sensors report InvalidTarget ahead of argument errors
    gateway.registry().table(sensor)?;
    if bucket_width <= 0 {
        return Err(StoreError::InvalidArgument(format!(
            "bucket width must be positive, got {}",
            bucket_width
        )));
    }
    let phase = reference_time.rem_euclid(bucket_width);

    let mut conn = gateway.open(sensor).await?;
    let table = conn.table();

    let count_sql = format!("SELECT COUNT(*) FROM {}", table);
    let total: i64 = sqlx::query_scalar(&count_sql)
        .fetch_one(&mut *conn)
        .await
        .inspect_err(|e| error!("Row count failed: {}", e))?;

    // Truncating `%` yields `phase` for non-negative dates and `phase - w`
    // for negative ones; neither side can overflow
    let base = format!(
        "SELECT date, temp, hr FROM {} WHERE date % ? IN (?, ?) ORDER BY date DESC",
        table
    );

    let (sql, capacity, row_limit) = match limit {
        Limit::Count(n) => {
            // The limit is an upper bound, never an allocation size
            let capacity = reserved_for_count(n, total);
            (format!("{} LIMIT ?", base), capacity, Some(n.get()))
        }
        Limit::Decimated => (base, estimate_capacity(total, bucket_width), None),
    };
    debug!("capacity: {} (from {} rows)", capacity, total);

    let mut query = sqlx::query_as::<_, Reading>(&sql)
        .bind(bucket_width)
        .bind(phase)
        .bind(phase - bucket_width);
    if let Some(n) = row_limit {
        query = query.bind(n);
    }

    let mut dataset = Dataset::with_capacity(capacity);
    let mut rows = query.fetch(&mut *conn);
    while let Some(reading) = rows
        .try_next()
        .await
        .inspect_err(|e| error!("Dataset query failed: {}", e))?
    {
        dataset.push(reading);
    }

    debug!("Returning {} readings", dataset.len());
    Ok(dataset)
}
