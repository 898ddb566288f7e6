//! Per-sensor reading store for the tempura temperature/humidity logger.
//!
//! Readings (epoch-millisecond timestamp, temperature, humidity) live in one
//! SQLite table per sensor. The crate serves three operations, each of which
//! validates the sensor name through the [`Gateway`] and takes its own
//! connection:
//! - [`add_reading`] – transactional insert; duplicates fail on the primary key
//! - [`get_reading`] – existence probe, then point fetch
//! - [`get_dataset`] – newest-first range read with bucket-phase decimation
//!
//! Internals are private modules; everything callers need is re-exported here.

mod access;
mod error;
mod gateway;
mod models;
mod registry;

pub mod config;
pub mod schema;

pub use access::{
    add_reading, estimate_capacity, get_dataset, get_reading, Limit, BASELINE_SAMPLE_INTERVAL_MS,
};
pub use config::Config;
pub use error::StoreError;
pub use gateway::{Gateway, SensorConnection};
pub use models::{Dataset, Reading};
pub use registry::{SchemaRegistry, SensorTable};
