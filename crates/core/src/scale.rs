//! Ordinal scales
//!
//! Each scale maps a fixed, ordered set of labels to the scores 1..N that
//! the server stores. Labels are matched exactly.

use crate::value::FieldValue;

/// Static label -> score table
#[derive(Debug, PartialEq, Eq)]
pub struct OrdinalScale {
    name: &'static str,
    labels: &'static [&'static str],
}

impl OrdinalScale {
    /// Create a scale; `labels[0]` scores 1
    pub const fn new(name: &'static str, labels: &'static [&'static str]) -> Self {
        Self { name, labels }
    }

    /// Scale name (e.g. "difficulty")
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Highest score on this scale
    pub fn max_score(&self) -> i64 {
        self.labels.len() as i64
    }

    /// Score for a label
    pub fn score(&self, label: &str) -> Option<i64> {
        self.labels
            .iter()
            .position(|l| *l == label)
            .map(|idx| idx as i64 + 1)
    }

    /// Label for a score
    pub fn label(&self, score: i64) -> Option<&'static str> {
        if score < 1 {
            return None;
        }
        self.labels.get(score as usize - 1).copied()
    }

    /// Translate a selected label; unknown labels become `Absent`
    pub fn translate(&self, label: &str) -> FieldValue {
        match self.score(label) {
            Some(score) => FieldValue::Number(score),
            None => FieldValue::Absent,
        }
    }

    /// `(label, score)` pairs in score order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (*label, idx as i64 + 1))
    }
}

pub static DIFFICULTY: OrdinalScale = OrdinalScale::new(
    "difficulty",
    &["very-easy", "easy", "moderate", "hard", "very-hard"],
);

pub static PUMP: OrdinalScale =
    OrdinalScale::new("pump", &["none", "poor", "ok", "good", "great"]);

pub static SORENESS: OrdinalScale = OrdinalScale::new(
    "soreness",
    &["none", "mild", "moderate", "sore", "very-sore"],
);

pub static RECOVERY: OrdinalScale = OrdinalScale::new(
    "recovery",
    &["not-recovered", "poor", "fair", "good", "great", "fully-recovered"],
);

pub static PERFORMANCE: OrdinalScale = OrdinalScale::new(
    "performance",
    &["terrible", "poor", "below-average", "average", "good", "excellent"],
);

pub static FATIGUE: OrdinalScale =
    OrdinalScale::new("fatigue", &["none", "low", "moderate", "high", "extreme"]);

/// Every scale, in display order
pub static ALL: [&OrdinalScale; 6] = [
    &DIFFICULTY,
    &PUMP,
    &SORENESS,
    &RECOVERY,
    &PERFORMANCE,
    &FATIGUE,
];

/// Look a scale up by name
pub fn by_name(name: &str) -> Option<&'static OrdinalScale> {
    ALL.iter().copied().find(|scale| scale.name() == name)
}
