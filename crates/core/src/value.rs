//! Field values and value transforms

use serde::{Serialize, Serializer};
use std::fmt;

/// A value held by one snapshot key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw or trimmed text
    Text(String),
    /// Ordinal score
    Number(i64),
    /// Field not present on the page
    Null,
    /// Value could not be translated; the key is left out of the JSON body
    Absent,
}

impl FieldValue {
    /// Whether this value is dropped on serialization
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => serializer.serialize_i64(*n),
            FieldValue::Null | FieldValue::Absent => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Absent => f.write_str("<absent>"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

/// Transform applied to a raw field value before it enters a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// Keep the value exactly as typed
    #[default]
    Raw,
    /// Strip surrounding whitespace
    Trim,
}

impl Transform {
    /// Apply the transform to a raw value
    pub fn apply(self, raw: &str) -> FieldValue {
        match self {
            Transform::Raw => FieldValue::Text(raw.to_string()),
            Transform::Trim => FieldValue::Text(raw.trim().to_string()),
        }
    }
}
