//! Field watching for liftlog autosave
//!
//! This crate provides:
//! - Field edit events addressed to a group instance
//! - Per-field debouncing (500ms by default)

pub mod debounce;
pub mod event;

pub use debounce::{CloseMode, Debouncer, DEFAULT_WINDOW};
pub use event::{FieldEvent, GroupId};
pub use liftlog_core::Trigger;
