//! Group kinds and their field descriptor tables
//!
//! A group kind fixes everything static about one kind of container on the
//! workout page: how to find it, which fields it owns, how each field's
//! value is read, where its snapshot is sent and what happens when a send
//! fails. Per-instance state lives in [`GroupSnapshot`](crate::GroupSnapshot).

use crate::scale::{self, OrdinalScale};
use crate::value::{FieldValue, Transform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of form element a field is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Input,
    Select,
    Textarea,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Input => "input",
            ElementKind::Select => "select",
            ElementKind::Textarea => "textarea",
        })
    }
}

/// UI event a field listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Fires on every keystroke
    Input,
    /// Fires when the field commits a new value
    Change,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trigger::Input => "input",
            Trigger::Change => "change",
        })
    }
}

/// One editable field within a group
#[derive(Debug)]
pub struct FieldDescriptor {
    /// Snapshot key, also the element's `name` attribute
    pub key: &'static str,
    /// Element the field is rendered as
    pub element: ElementKind,
    /// Ordinal scale the selected label is translated through
    pub scale: Option<&'static OrdinalScale>,
    /// Transform for unscaled values
    pub transform: Transform,
    /// Event that schedules a save
    pub trigger: Trigger,
}

impl FieldDescriptor {
    const fn new(key: &'static str, element: ElementKind) -> Self {
        Self {
            key,
            element,
            scale: None,
            transform: Transform::Raw,
            trigger: Trigger::Change,
        }
    }

    const fn scaled(key: &'static str, element: ElementKind, scale: &'static OrdinalScale) -> Self {
        Self {
            key,
            element,
            scale: Some(scale),
            transform: Transform::Raw,
            trigger: Trigger::Change,
        }
    }

    /// Convert a raw element value into a snapshot value
    ///
    /// The scale wins over the transform when both could apply.
    pub fn read(&self, raw: &str) -> FieldValue {
        match self.scale {
            Some(scale) => scale.translate(raw),
            None => self.transform.apply(raw),
        }
    }
}

/// Where a group's identity value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Text of the container's heading
    Heading,
    /// Value of a named input inside the container (not watched)
    Input(&'static str),
}

/// Snapshot key identifying the group instance to the server
#[derive(Debug)]
pub struct IdentityDescriptor {
    pub key: &'static str,
    pub source: IdentitySource,
    pub transform: Transform,
}

/// How a group's containers are found on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerLocator {
    /// A single standalone element, by id; the element is its own container
    Id(&'static str),
    /// Every container carrying this class
    Class(&'static str),
}

/// What happens to the UI when a send fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Restore the page-load value and raise a blocking alert
    RevertAndAlert,
    /// Log and keep the edited value
    LogOnly,
}

/// Kind of group rendered on the workout page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Date,
    Exercise,
    MuscleGroup,
    Overall,
}

static DATE_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor {
    key: "workout_date",
    element: ElementKind::Input,
    scale: None,
    transform: Transform::Raw,
    trigger: Trigger::Input,
}];

static EXERCISE_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor::new("weight_used", ElementKind::Input),
    FieldDescriptor::new("sets_completed", ElementKind::Input),
    FieldDescriptor::new("reps_completed", ElementKind::Input),
    FieldDescriptor::scaled("difficulty", ElementKind::Input, &scale::DIFFICULTY),
    FieldDescriptor::new("exercise_notes", ElementKind::Textarea),
];

static MUSCLE_GROUP_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::scaled("pump_level", ElementKind::Select, &scale::PUMP),
    FieldDescriptor::scaled("pre_workout_soreness", ElementKind::Select, &scale::SORENESS),
    FieldDescriptor::scaled("pre_workout_recovery", ElementKind::Select, &scale::RECOVERY),
    FieldDescriptor::new("muscle_group_notes", ElementKind::Textarea),
];

static OVERALL_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor::new("workout_duration", ElementKind::Input),
    FieldDescriptor::new("workout_type", ElementKind::Select),
    FieldDescriptor::scaled("performance_rating", ElementKind::Select, &scale::PERFORMANCE),
    FieldDescriptor::scaled("fatigue_induced", ElementKind::Select, &scale::FATIGUE),
    FieldDescriptor::new("workout_notes", ElementKind::Textarea),
];

static EXERCISE_IDENTITY: IdentityDescriptor = IdentityDescriptor {
    key: "exercise_name",
    source: IdentitySource::Heading,
    transform: Transform::Trim,
};

static MUSCLE_GROUP_IDENTITY: IdentityDescriptor = IdentityDescriptor {
    key: "muscle_group_name",
    source: IdentitySource::Heading,
    transform: Transform::Trim,
};

static OVERALL_IDENTITY: IdentityDescriptor = IdentityDescriptor {
    key: "workout_id",
    source: IdentitySource::Input("workout_id"),
    transform: Transform::Raw,
};

impl GroupKind {
    /// Every kind, in page scan order
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Date,
        GroupKind::Exercise,
        GroupKind::MuscleGroup,
        GroupKind::Overall,
    ];

    /// Server path this kind's snapshots are POSTed to
    pub fn endpoint(self) -> &'static str {
        match self {
            GroupKind::Date => "/update_curr_workout_date",
            GroupKind::Exercise => "/update_curr_workout_exercise",
            GroupKind::MuscleGroup => "/update_curr_workout_muscle_group",
            GroupKind::Overall => "/update_curr_workout_overall",
        }
    }

    pub fn locator(self) -> ContainerLocator {
        match self {
            GroupKind::Date => ContainerLocator::Id("workout-date"),
            GroupKind::Exercise => ContainerLocator::Class("exercise-info"),
            GroupKind::MuscleGroup => ContainerLocator::Class("log-container-muscle"),
            GroupKind::Overall => ContainerLocator::Class("log-container-overall"),
        }
    }

    /// Watched fields, in snapshot order
    pub fn descriptors(self) -> &'static [FieldDescriptor] {
        match self {
            GroupKind::Date => &DATE_FIELDS,
            GroupKind::Exercise => &EXERCISE_FIELDS,
            GroupKind::MuscleGroup => &MUSCLE_GROUP_FIELDS,
            GroupKind::Overall => &OVERALL_FIELDS,
        }
    }

    /// Identity key read once at scan time, if the kind has one
    pub fn identity(self) -> Option<&'static IdentityDescriptor> {
        match self {
            GroupKind::Date => None,
            GroupKind::Exercise => Some(&EXERCISE_IDENTITY),
            GroupKind::MuscleGroup => Some(&MUSCLE_GROUP_IDENTITY),
            GroupKind::Overall => Some(&OVERALL_IDENTITY),
        }
    }

    // Only the date field rolls back. See DESIGN.md, open questions.
    pub fn failure_policy(self) -> FailurePolicy {
        match self {
            GroupKind::Date => FailurePolicy::RevertAndAlert,
            _ => FailurePolicy::LogOnly,
        }
    }

    /// Descriptor for a snapshot key
    pub fn descriptor(self, key: &str) -> Option<&'static FieldDescriptor> {
        self.descriptors().iter().find(|d| d.key == key)
    }

    /// Short name used in logs and edit scripts
    pub fn as_str(self) -> &'static str {
        match self {
            GroupKind::Date => "date",
            GroupKind::Exercise => "exercise",
            GroupKind::MuscleGroup => "muscle",
            GroupKind::Overall => "overall",
        }
    }

    /// Parse the short name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
