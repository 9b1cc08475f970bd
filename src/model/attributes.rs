//! Per-instance attribute storage.
//!
//! A flat name → JSON value map. Setting is a silent overwrite and emits
//! nothing; reactivity is the caller's business. Snapshots are
//! independent copies.

use parking_lot::RwLock;
use serde_json::{Map, Value};

pub struct AttributeStore {
    values: RwLock<Map<String, Value>>,
}

impl AttributeStore {
    /// Created empty at instance construction.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(Map::new()),
        }
    }

    /// Current value, or `None` if the attribute was never set.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.read().get(name).cloned()
    }

    /// Set `name`, silently overwriting any previous value.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.values.write().insert(name.into(), value);
    }

    /// Independent copy of the full mapping at this point in time.
    /// Mutating the copy never affects the live store.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.values.read().clone()
    }
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}
