//! Sensor table: category -> instance -> attribute -> normalized value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute name of the health column racadm prints for most sensors.
pub const STATUS_ATTR: &str = "status";

/// Attribute map of one sensor instance (e.g. `status`, `reading`, `units`).
pub type Attributes = BTreeMap<String, String>;

/// Sensor instances of one category, keyed by formatted instance name.
pub type Instances = BTreeMap<String, Attributes>;

/// Structured form of a racadm sensor report.
///
/// Built once per invocation by [`crate::report::parser::parse`] and read-only
/// afterwards. Ordered maps keep enumeration (and the debug JSON dump) stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorTable {
    categories: BTreeMap<String, Instances>,
}

impl SensorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories, including ones that ended up with no instances.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn instance_count(&self) -> usize {
        self.categories.values().map(|i| i.len()).sum()
    }

    pub fn category(&self, name: &str) -> Option<&Instances> {
        self.categories.get(name)
    }

    pub fn instance(&self, category: &str, name: &str) -> Option<&Attributes> {
        self.categories.get(category).and_then(|i| i.get(name))
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &Instances)> {
        self.categories.iter()
    }

    /// Get the instance map of `name`, creating an empty one if absent.
    /// Later sections of the same category append to it.
    pub fn ensure_category(&mut self, name: &str) -> &mut Instances {
        self.categories.entry(name.to_string()).or_default()
    }

    /// Insert (or overwrite) one instance. Other instances of the category are kept.
    pub fn insert_instance(&mut self, category: &str, name: String, attributes: Attributes) {
        self.ensure_category(category).insert(name, attributes);
    }
}
