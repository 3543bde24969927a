//! Debounced autosave of workout page groups
//!
//! This crate provides:
//! - The transport used to POST snapshots (reqwest over HTTP)
//! - The failure taxonomy shared by every group
//! - Per-group synchronizers (snapshot + one debouncer per field)
//! - The session that scans a page and routes field events

pub mod error;
pub mod group;
pub mod notify;
pub mod session;
pub mod transport;

// Re-exports
pub use error::{DispatchError, SyncError, UPDATE_FAILED};
pub use group::GroupSync;
pub use notify::Notifier;
pub use session::{Dispatch, SyncOptions, SyncSession};
pub use transport::{send_update, HttpTransport, Transport};
pub use watcher::{CloseMode, FieldEvent, GroupId};
