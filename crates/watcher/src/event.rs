//! Field edit events

use liftlog_core::Trigger;
use std::fmt;

/// Index of a group instance in page scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A UI event on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    /// Group instance owning the field
    pub group: GroupId,
    /// Snapshot key of the field
    pub field: String,
    /// Which UI event fired
    pub trigger: Trigger,
    /// Raw element value at the time of the event
    pub value: String,
}

impl FieldEvent {
    pub fn new(group: GroupId, field: &str, trigger: Trigger, value: &str) -> Self {
        Self {
            group,
            field: field.to_string(),
            trigger,
            value: value.to_string(),
        }
    }
}
