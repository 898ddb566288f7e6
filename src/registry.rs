//! Schema registry: the fixed set of sensor identifiers that name tables.
//!
//! Identifiers are validated once, at construction. After that a
//! [`SensorTable`] can only be obtained through [`SchemaRegistry::table`],
//! which is the single place a caller-supplied name is checked before it is
//! interpolated into SQL text.

use std::collections::BTreeSet;
use std::fmt;

use crate::StoreError;

// ---

/// Immutable allow-list of sensor identifiers.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    // ---
    sensors: BTreeSet<String>,
}

/// A sensor name that has passed registry validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorTable<'a> {
    name: &'a str,
}

impl SchemaRegistry {
    // ---
    /// Build a registry from a list of identifiers.
    ///
    /// Entries are trimmed and empty entries are skipped, so a raw
    /// comma-split list with a trailing comma is accepted. Any entry that is
    /// not `[A-Za-z_][A-Za-z0-9_]*` fails the whole construction.
    pub fn new<I, S>(sensors: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // ---
        let mut set = BTreeSet::new();
        for raw in sensors {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if !is_identifier(name) {
                return Err(StoreError::InvalidIdentifier(name.to_string()));
            }
            set.insert(name.to_string());
        }
        Ok(Self { sensors: set })
    }

    pub fn contains(&self, sensor: &str) -> bool {
        self.sensors.contains(sensor)
    }

    /// Resolve `sensor` to a table reference, or fail with `InvalidTarget`.
    pub fn table<'a>(&'a self, sensor: &str) -> Result<SensorTable<'a>, StoreError> {
        // ---
        match self.sensors.get(sensor) {
            Some(name) => Ok(SensorTable { name }),
            None => Err(StoreError::InvalidTarget(sensor.to_string())),
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = SensorTable<'_>> {
        self.sensors.iter().map(|name| SensorTable { name })
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl<'a> SensorTable<'a> {
    // ---
    pub fn name(&self) -> &'a str {
        self.name
    }
}

/// Renders the quoted identifier used in SQL text.
impl fmt::Display for SensorTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.name)
    }
}

fn is_identifier(name: &str) -> bool {
    // ---
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
