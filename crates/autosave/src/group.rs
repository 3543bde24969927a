//! Per-group synchronizer
//!
//! One `GroupSync` exists per rendered group instance. It owns the group's
//! snapshot and one debouncer per watched field. When a debouncer fires, the
//! new value is written into the snapshot and the whole snapshot is sent.

use crate::error::SyncError;
use crate::notify::Notifier;
use crate::transport::{send_update, Transport};
use liftlog_core::{
    Container, FailurePolicy, Field, FieldDescriptor, FieldValue, GroupKind, GroupSnapshot,
    IdentitySource,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use watcher::{CloseMode, Debouncer, GroupId};

/// Where a group's fields live on the page
pub(crate) enum Scope<'a> {
    /// A standalone element that is its own container
    Element(Arc<Field>),
    /// A container holding named fields
    Container(&'a Container),
}

impl Scope<'_> {
    fn field(&self, descriptor: &FieldDescriptor) -> Option<Arc<Field>> {
        match self {
            Scope::Element(field) if field.element() == descriptor.element => Some(field.clone()),
            Scope::Element(_) => None,
            Scope::Container(container) => container.find(descriptor.element, descriptor.key),
        }
    }
}

/// Shared collaborators handed to every group
#[derive(Clone)]
pub(crate) struct SyncContext {
    pub transport: Arc<dyn Transport>,
    pub notifier: Arc<dyn Notifier>,
    pub window: Duration,
}

struct FieldWatch {
    descriptor: &'static FieldDescriptor,
    field: Arc<Field>,
    debouncer: Debouncer<String>,
}

/// Synchronizer for one group instance
pub struct GroupSync {
    id: GroupId,
    kind: GroupKind,
    label: String,
    snapshot: Arc<Mutex<GroupSnapshot>>,
    watches: Vec<FieldWatch>,
}

impl GroupSync {
    /// Scan a group and wire up its fields
    ///
    /// Missing fields are recorded as `null` and left unwatched.
    pub(crate) fn attach(id: GroupId, kind: GroupKind, scope: Scope<'_>, ctx: &SyncContext) -> Self {
        let mut snapshot = GroupSnapshot::new();
        let mut label = String::new();

        if let (Some(identity), Scope::Container(container)) = (kind.identity(), &scope) {
            let value = match identity.source {
                IdentitySource::Heading => container
                    .heading()
                    .map(|text| identity.transform.apply(text))
                    .unwrap_or(FieldValue::Null),
                // A missing hidden input is dropped from the body entirely
                IdentitySource::Input(name) => container
                    .find_named(name)
                    .map(|field| identity.transform.apply(&field.value()))
                    .unwrap_or(FieldValue::Absent),
            };
            label = match &value {
                FieldValue::Text(text) => text.clone(),
                FieldValue::Number(n) => n.to_string(),
                _ => String::new(),
            };
            snapshot.set(identity.key, value);
        }

        let mut present = Vec::new();
        for descriptor in kind.descriptors() {
            match scope.field(descriptor) {
                Some(field) => {
                    snapshot.set(descriptor.key, descriptor.read(&field.value()));
                    present.push((descriptor, field));
                }
                None => snapshot.set(descriptor.key, FieldValue::Null),
            }
        }

        if let Scope::Element(field) = &scope {
            label = field.id().unwrap_or_default().to_string();
        }

        let snapshot = Arc::new(Mutex::new(snapshot));
        let watches = present
            .into_iter()
            .map(|(descriptor, field)| FieldWatch {
                descriptor,
                field: field.clone(),
                debouncer: spawn_field_debouncer(kind, descriptor, field, snapshot.clone(), ctx),
            })
            .collect();

        Self {
            id,
            kind,
            label,
            snapshot,
            watches,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Identity text (exercise name, muscle group, workout id) or element id
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> GroupSnapshot {
        self.snapshot.lock().clone()
    }

    /// Keys of the fields that are present and watched
    pub fn watched_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.watches.iter().map(|w| w.descriptor.key)
    }

    /// Page element behind a watched key
    pub fn field(&self, key: &str) -> Option<Arc<Field>> {
        self.watch(key).map(|w| w.field.clone())
    }

    pub(crate) fn descriptor(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.watch(key).map(|w| w.descriptor)
    }

    /// Schedule a save of `key` with `raw`
    pub(crate) fn schedule(&self, key: &str, raw: String) -> bool {
        match self.watch(key) {
            Some(watch) => {
                watch.debouncer.call(raw);
                true
            }
            None => false,
        }
    }

    /// Stop watching; the snapshot stays readable
    pub(crate) async fn close(&mut self, mode: CloseMode) {
        for watch in self.watches.drain(..) {
            watch.debouncer.close(mode).await;
        }
    }

    fn watch(&self, key: &str) -> Option<&FieldWatch> {
        self.watches.iter().find(|w| w.descriptor.key == key)
    }
}

fn spawn_field_debouncer(
    kind: GroupKind,
    descriptor: &'static FieldDescriptor,
    field: Arc<Field>,
    snapshot: Arc<Mutex<GroupSnapshot>>,
    ctx: &SyncContext,
) -> Debouncer<String> {
    let transport = ctx.transport.clone();
    let notifier = ctx.notifier.clone();

    Debouncer::spawn(ctx.window, move |raw: String| {
        let field = field.clone();
        let snapshot = snapshot.clone();
        let transport = transport.clone();
        let notifier = notifier.clone();

        async move {
            let body = {
                let mut snapshot = snapshot.lock();
                snapshot.set(descriptor.key, descriptor.read(&raw));
                snapshot.clone()
            };

            match send_update(transport.as_ref(), kind.endpoint(), &body).await {
                Ok(_) => debug!("Saved {}.{}", kind, descriptor.key),
                Err(e) => handle_failure(kind, descriptor, &field, &snapshot, notifier.as_ref(), &e),
            }
        }
    })
}

fn handle_failure(
    kind: GroupKind,
    descriptor: &'static FieldDescriptor,
    field: &Field,
    snapshot: &Mutex<GroupSnapshot>,
    notifier: &dyn Notifier,
    error: &SyncError,
) {
    match kind.failure_policy() {
        FailurePolicy::RevertAndAlert => {
            warn!(
                "Saving {}.{} failed, reverting to {:?}: {}",
                kind,
                descriptor.key,
                field.default_value(),
                error
            );
            field.reset();
            snapshot
                .lock()
                .set(descriptor.key, descriptor.read(field.default_value()));
            notifier.alert(error.user_message());
        }
        FailurePolicy::LogOnly => {
            warn!("Saving {}.{} failed: {}", kind, descriptor.key, error);
        }
    }
}
