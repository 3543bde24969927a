//! Core data model for liftlog autosave
//!
//! This crate provides:
//! - Field values and value transforms
//! - Ordinal scales (label -> score tables)
//! - Group kinds, field descriptor tables and endpoint bindings
//! - Group snapshots (the JSON body sent on every change)
//! - The in-memory page model the synchronizer attaches to

pub mod group;
pub mod page;
pub mod scale;
pub mod snapshot;
pub mod value;

// Re-exports
pub use group::{
    ContainerLocator, ElementKind, FailurePolicy, FieldDescriptor, GroupKind, IdentityDescriptor,
    IdentitySource, Trigger,
};
pub use page::{Container, Field, Page, PageError};
pub use scale::OrdinalScale;
pub use snapshot::GroupSnapshot;
pub use value::{FieldValue, Transform};
