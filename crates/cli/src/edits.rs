//! Edit scripts
//!
//! An edit script replays what a user does on the workout page, one step
//! per line:
//!
//! ```text
//! # comments start with '#' followed by a non-digit
//! exercise:Bench Press weight_used=145
//! sleep 200
//! muscle:Chest pump_level=great
//! input date workout_date=2024-05-07
//! #3 workout_notes=short session
//! ```
//!
//! Targets are `date`, `exercise:<name>`, `muscle:<name>`, `overall:<id>`
//! or `#<index>` (scan order). The field name is the last word before the
//! first `=`; everything after it is the value. An optional leading
//! `input`/`change` overrides the event fired, which otherwise is the one
//! the field listens for.

use autosave::{GroupId, SyncSession};
use liftlog_core::{GroupKind, Trigger};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct EditParseError {
    pub line: usize,
    pub message: String,
}

/// Group an edit is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The standalone workout date
    Date,
    /// Group of `kind` whose label matches
    Labeled(GroupKind, String),
    /// Group by scan index
    Index(usize),
}

impl Target {
    fn parse(text: &str) -> Option<Self> {
        if text == "date" {
            return Some(Target::Date);
        }
        if let Some(index) = text.strip_prefix('#') {
            return index.parse().ok().map(Target::Index);
        }
        let (kind, label) = text.split_once(':')?;
        let kind = GroupKind::from_name(kind)?;
        if kind == GroupKind::Date || label.trim().is_empty() {
            return None;
        }
        Some(Target::Labeled(kind, label.trim().to_string()))
    }

    /// Find the group this target names
    pub fn resolve(&self, session: &SyncSession) -> Option<GroupId> {
        match self {
            Target::Date => session
                .groups()
                .iter()
                .find(|g| g.kind() == GroupKind::Date)
                .map(|g| g.id()),
            Target::Labeled(kind, label) => session.find(*kind, label),
            Target::Index(index) => session.group(GroupId(*index)).map(|g| g.id()),
        }
    }
}

/// One script step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Edit {
        target: Target,
        field: String,
        value: String,
        trigger: Option<Trigger>,
    },
    Sleep(Duration),
}

/// Parse one line; blank lines and comments yield `None`
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Step>, EditParseError> {
    let err = |message: String| EditParseError {
        line: line_no,
        message,
    };

    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() || is_comment(trimmed) {
        return Ok(None);
    }

    if let Some(ms) = trimmed.strip_prefix("sleep ") {
        let ms: u64 = ms
            .trim()
            .parse()
            .map_err(|_| err(format!("invalid sleep duration '{}'", ms.trim())))?;
        return Ok(Some(Step::Sleep(Duration::from_millis(ms))));
    }

    let (head, value) = trimmed
        .split_once('=')
        .ok_or_else(|| err("expected '<target> <field>=<value>'".to_string()))?;

    let (trigger, head) = if let Some(rest) = head.strip_prefix("input ") {
        (Some(Trigger::Input), rest)
    } else if let Some(rest) = head.strip_prefix("change ") {
        (Some(Trigger::Change), rest)
    } else {
        (None, head)
    };

    let (target, field) = head
        .trim()
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| err("missing field name".to_string()))?;
    let target = Target::parse(target.trim())
        .ok_or_else(|| err(format!("unknown target '{}'", target.trim())))?;

    Ok(Some(Step::Edit {
        target,
        field: field.to_string(),
        value: value.to_string(),
        trigger,
    }))
}

fn is_comment(line: &str) -> bool {
    match line.strip_prefix('#') {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// Parse a whole script
pub fn parse_script(text: &str) -> Result<Vec<Step>, EditParseError> {
    let mut steps = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(step) = parse_line(idx + 1, line)? {
            steps.push(step);
        }
    }
    Ok(steps)
}
