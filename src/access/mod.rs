//! Data-access paths. Each operation goes through the
//! [`Gateway`](crate::Gateway) on its own and shares nothing with the others.

mod add_reading;
mod get_dataset;
mod get_reading;

pub use add_reading::add_reading;
pub use get_dataset::{estimate_capacity, get_dataset, Limit, BASELINE_SAMPLE_INTERVAL_MS};
pub use get_reading::get_reading;
