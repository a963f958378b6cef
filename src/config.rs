use serde::{Deserialize, Serialize};

/// Construction options for [`SortedConcurrentMap`].
///
/// [`SortedConcurrentMap`]: crate::SortedConcurrentMap
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Attached to every log event emitted by the map.
    pub name: String,
    /// Entries to reserve up front. Only a hint, never affects `len()`.
    pub capacity: usize,
}

impl MapConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: 0,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
