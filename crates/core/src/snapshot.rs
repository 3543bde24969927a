//! Group snapshots
//!
//! A snapshot is the full current state of one group instance. It is
//! mutated in place on every field change and sent whole, never as a diff.

use crate::value::FieldValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered key -> value record for one group instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSnapshot {
    entries: Vec<(&'static str, FieldValue)>,
}

impl GroupSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, keeping its original position if it already exists
    pub fn set(&mut self, key: &'static str, value: FieldValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Current value for a key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

impl Serialize for GroupSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.entries.iter().filter(|(_, v)| !v.is_absent());
        let mut map = serializer.serialize_map(Some(present.clone().count()))?;
        for (key, value) in present {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
