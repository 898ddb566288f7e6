//! Error taxonomy for the reading store.
//!
//! Every public data-access operation returns [`StoreError`]. Store-level
//! failures are wrapped verbatim in [`StoreError::Store`]; nothing is
//! swallowed except "row not found" on point reads, which is a success.

use thiserror::Error;

// ---

#[derive(Debug, Error)]
pub enum StoreError {
    /// Sensor identifier is not in the schema registry. Raised before any
    /// store access.
    #[error("target table is invalid: {0}")]
    InvalidTarget(String),

    /// The point-read probe found a row at the requested timestamp.
    #[error("a reading already exists for {sensor} at {timestamp}")]
    AlreadyExists { sensor: String, timestamp: i64 },

    /// Caller supplied an argument the range read cannot use.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Registry entry that is not a plain SQL identifier.
    #[error("invalid sensor identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Connection, transaction, or statement failure from the store.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl StoreError {
    // ---
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }

    pub fn is_invalid_target(&self) -> bool {
        matches!(self, StoreError::InvalidTarget(_))
    }
}
