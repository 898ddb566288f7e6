//! Connection gateway.
//!
//! Every data-access operation starts here: the sensor name is checked
//! against the [`SchemaRegistry`] and only then is a connection taken from
//! the pool. The returned [`SensorConnection`] owns that connection for the
//! duration of one call and hands it back to the pool when dropped, on every
//! exit path.

use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::error;

use crate::{SchemaRegistry, SensorTable, StoreError};

// ---

/// Validating entry point to the store. Cheap to clone.
///
/// The pool is not exposed: every connection handed out has passed the
/// registry check.
#[derive(Debug, Clone)]
pub struct Gateway {
    // ---
    pool: SqlitePool,
    registry: SchemaRegistry,
}

/// A call-scoped connection bound to one validated sensor table.
pub struct SensorConnection<'a> {
    // ---
    table: SensorTable<'a>,
    conn: PoolConnection<Sqlite>,
}

impl Gateway {
    // ---
    pub fn new(pool: SqlitePool, registry: SchemaRegistry) -> Self {
        Self { pool, registry }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Open a connection for `sensor`.
    ///
    /// Fails with [`StoreError::InvalidTarget`] without touching the pool if
    /// the sensor is not registered.
    pub async fn open(&self, sensor: &str) -> Result<SensorConnection<'_>, StoreError> {
        // ---
        let table = self.registry.table(sensor).inspect_err(|e| error!("{}", e))?;

        let conn = self.pool.acquire().await.inspect_err(|e| {
            error!("Failed to acquire connection for {}: {}", sensor, e);
        })?;

        Ok(SensorConnection { table, conn })
    }
}

impl<'a> SensorConnection<'a> {
    // ---
    pub fn table(&self) -> SensorTable<'a> {
        self.table
    }
}

impl Deref for SensorConnection<'_> {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for SensorConnection<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
