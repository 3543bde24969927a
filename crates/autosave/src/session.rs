//! Autosave session
//!
//! A session is one attachment of the synchronizer to one loaded page. It
//! scans the page once, keeps every group instance in an arena addressed by
//! [`GroupId`], and routes field events to the right debouncer. Dropping the
//! session is the equivalent of navigating away: pending saves are lost and
//! requests already in flight finish on their own.
//!
//! Sends for different fields race. Every send carries the full snapshot and
//! the server is expected to apply it as a last-write-wins replace.

use crate::error::DispatchError;
use crate::group::{GroupSync, Scope, SyncContext};
use crate::notify::Notifier;
use crate::transport::Transport;
use futures::future::join_all;
use liftlog_core::{ContainerLocator, GroupKind, GroupSnapshot, Page};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use watcher::{CloseMode, FieldEvent, GroupId, DEFAULT_WINDOW};

/// Session tuning
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Debounce window applied to every field
    pub window: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

/// Result of routing a field event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A save was scheduled
    Scheduled,
    /// The field does not listen for this kind of event
    Ignored,
}

/// Synchronizer attached to one page
pub struct SyncSession {
    groups: Vec<GroupSync>,
}

impl SyncSession {
    /// Scan `page` and attach a synchronizer to every group found
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(
        page: &Page,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        options: SyncOptions,
    ) -> Self {
        let ctx = SyncContext {
            transport,
            notifier,
            window: options.window,
        };

        let mut groups = Vec::new();
        for kind in GroupKind::ALL {
            match kind.locator() {
                ContainerLocator::Id(id) => {
                    if let Some(field) = page.element_by_id(id) {
                        let group_id = GroupId(groups.len());
                        groups.push(GroupSync::attach(group_id, kind, Scope::Element(field), &ctx));
                    }
                }
                ContainerLocator::Class(class) => {
                    for (_, container) in page.containers_by_class(class) {
                        let group_id = GroupId(groups.len());
                        groups.push(GroupSync::attach(
                            group_id,
                            kind,
                            Scope::Container(container),
                            &ctx,
                        ));
                    }
                }
            }
        }

        let watched: usize = groups.iter().map(|g| g.watched_fields().count()).sum();
        info!(
            "Autosave attached to {} groups ({} fields, window {:?})",
            groups.len(),
            watched,
            options.window
        );

        Self { groups }
    }

    /// Route an event to its field's debouncer
    pub fn dispatch(&self, event: FieldEvent) -> Result<Dispatch, DispatchError> {
        let group = self
            .group(event.group)
            .ok_or(DispatchError::UnknownGroup(event.group))?;

        let descriptor = group
            .descriptor(&event.field)
            .ok_or_else(|| DispatchError::UnknownField {
                group: event.group,
                kind: group.kind(),
                field: event.field.clone(),
            })?;

        if descriptor.trigger != event.trigger {
            debug!(
                "Ignoring {} event on {} field {}",
                event.trigger, descriptor.trigger, event.field
            );
            return Ok(Dispatch::Ignored);
        }

        group.schedule(&event.field, event.value);
        Ok(Dispatch::Scheduled)
    }

    /// Change a field's displayed value and fire its own event
    pub fn edit(&self, group: GroupId, key: &str, value: &str) -> Result<Dispatch, DispatchError> {
        let sync = self.group(group).ok_or(DispatchError::UnknownGroup(group))?;
        let (field, descriptor) = match (sync.field(key), sync.descriptor(key)) {
            (Some(field), Some(descriptor)) => (field, descriptor),
            _ => {
                return Err(DispatchError::UnknownField {
                    group,
                    kind: sync.kind(),
                    field: key.to_string(),
                })
            }
        };

        field.set_value(value);
        self.dispatch(FieldEvent::new(group, key, descriptor.trigger, value))
    }

    pub fn group(&self, id: GroupId) -> Option<&GroupSync> {
        self.groups.get(id.0)
    }

    /// All groups in scan order
    pub fn groups(&self) -> &[GroupSync] {
        &self.groups
    }

    /// First group of `kind` whose label matches
    pub fn find(&self, kind: GroupKind, label: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| g.kind() == kind && g.label() == label)
            .map(|g| g.id())
    }

    /// Copy of a group's current snapshot
    pub fn snapshot(&self, id: GroupId) -> Option<GroupSnapshot> {
        self.group(id).map(|g| g.snapshot())
    }

    /// Close every debouncer, flushing or discarding pending saves
    ///
    /// Snapshots stay readable afterwards; no field is watched any more.
    pub async fn close(&mut self, mode: CloseMode) {
        join_all(self.groups.iter_mut().map(|g| g.close(mode))).await;
    }
}
