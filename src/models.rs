//! Data models for stored sensor readings.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---

/// One stored reading. `Default` is the zero value returned by a point read
/// that finds no row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct Reading {
    // ---
    /// Epoch milliseconds; primary key of the sensor table.
    #[sqlx(rename = "date")]
    #[serde(rename = "date")]
    pub timestamp: i64,

    #[sqlx(rename = "temp")]
    #[serde(rename = "temp")]
    pub temperature: f64,

    #[sqlx(rename = "hr")]
    #[serde(rename = "hr")]
    pub humidity: f64,
}

impl Reading {
    // ---
    pub fn new(timestamp: i64, temperature: f64, humidity: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
        }
    }

    /// Timestamp as a UTC instant, `None` if out of chrono's range.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Index-aligned columns of readings, newest first.
///
/// The three sequences are private and only grow through [`Dataset::push`],
/// so they always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    // ---
    #[serde(rename = "date")]
    timestamps: Vec<i64>,

    #[serde(rename = "temp")]
    temperatures: Vec<f64>,

    #[serde(rename = "hr")]
    humidities: Vec<f64>,
}

impl Dataset {
    // ---
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            temperatures: Vec::with_capacity(capacity),
            humidities: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, reading: Reading) {
        self.timestamps.push(reading.timestamp);
        self.temperatures.push(reading.temperature);
        self.humidities.push(reading.humidity);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.timestamps.capacity()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn humidities(&self) -> &[f64] {
        &self.humidities
    }

    pub fn get(&self, index: usize) -> Option<Reading> {
        Some(Reading {
            timestamp: *self.timestamps.get(index)?,
            temperature: self.temperatures[index],
            humidity: self.humidities[index],
        })
    }

    /// Newest reading in the set.
    pub fn latest(&self) -> Option<Reading> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Reading> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

impl FromIterator<Reading> for Dataset {
    fn from_iter<T: IntoIterator<Item = Reading>>(iter: T) -> Self {
        // ---
        let iter = iter.into_iter();
        let mut dataset = Dataset::with_capacity(iter.size_hint().0);
        for reading in iter {
            dataset.push(reading);
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_zero_value_reading() {
        // ---
        let zero = Reading::default();
        assert_eq!(zero, Reading::new(0, 0.0, 0.0));
    }

    #[test]
    fn test_recorded_at() {
        // ---
        let reading = Reading::new(1_735_732_800_000, 21.5, 40.0);
        assert_eq!(
            reading.recorded_at(),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_push_keeps_columns_aligned() {
        // ---
        let mut dataset = Dataset::with_capacity(4);
        assert!(dataset.capacity() >= 4);
        assert!(dataset.is_empty());

        dataset.push(Reading::new(600_000, 20.0, 55.0));
        dataset.push(Reading::new(0, 18.5, 60.0));

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.timestamps(), &[600_000, 0]);
        assert_eq!(dataset.temperatures(), &[20.0, 18.5]);
        assert_eq!(dataset.humidities(), &[55.0, 60.0]);
        assert_eq!(dataset.latest(), Some(Reading::new(600_000, 20.0, 55.0)));
        assert_eq!(dataset.get(2), None);
    }

    #[test]
    fn test_collect_and_iterate() {
        // ---
        let readings = vec![
            Reading::new(900_000, 22.0, 41.0),
            Reading::new(300_000, 21.0, 42.0),
        ];
        let dataset: Dataset = readings.iter().copied().collect();

        assert_eq!(dataset.iter().collect::<Vec<_>>(), readings);
    }

    #[test]
    fn test_dataset_serializes_as_columns() {
        // ---
        let dataset: Dataset = [Reading::new(300_000, 21.0, 42.0)].into_iter().collect();
        let json = serde_json::to_value(&dataset).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "date": [300000], "temp": [21.0], "hr": [42.0] })
        );
    }
}
