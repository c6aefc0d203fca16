// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Snapshots of watched objects and the change events that carry them.

use crate::constants::ZERO_TIME_UNIX_SECS;
use kube::api::DynamicObject;
use kube::{Resource, ResourceExt};

/// Snapshot of one watched object at the time of an event.
///
/// Owned by the reconciliation step that handles the event and dropped
/// afterwards; snapshots are never shared between events.
#[derive(Clone, Debug)]
pub struct WatchedResource {
    object: DynamicObject,
}

impl WatchedResource {
    pub fn new(object: DynamicObject) -> Self {
        Self { object }
    }

    pub fn name(&self) -> String {
        self.object.name_any()
    }

    /// Namespace of the object, `None` for cluster-scoped kinds
    pub fn namespace(&self) -> Option<String> {
        self.object.namespace()
    }

    /// Finalizer tokens in the order the store reports them
    pub fn finalizers(&self) -> &[String] {
        self.object.meta().finalizers.as_deref().unwrap_or_default()
    }

    pub fn resource_version(&self) -> Option<String> {
        self.object.resource_version()
    }

    /// True when the store has recorded a deletion request that is still
    /// waiting on finalizers. A zero timestamp counts as no request.
    pub fn is_pending_deletion(&self) -> bool {
        self.object
            .meta()
            .deletion_timestamp
            .as_ref()
            .is_some_and(|t| t.0.timestamp() > ZERO_TIME_UNIX_SECS)
    }

    /// `apiVersion/kind` carried by the payload, if any
    pub fn type_name(&self) -> Option<String> {
        self.object
            .types
            .as_ref()
            .map(|t| format!("{}/{}", t.api_version, t.kind))
    }

    pub fn object(&self) -> &DynamicObject {
        &self.object
    }
}

/// A classified watch event. The raw event type is decided once, when the
/// event leaves the subscription.
#[derive(Clone, Debug)]
pub enum ChangeEvent {
    Created(WatchedResource),
    Updated(WatchedResource),
    Removed(WatchedResource),
    /// The stream reported an error; carries the server's diagnostic
    StreamError(String),
}

impl ChangeEvent {
    /// Verb used in observer notices
    pub fn verb(&self) -> &'static str {
        match self {
            ChangeEvent::Created(_) => "ADDED",
            ChangeEvent::Updated(_) => "MODIFIED",
            ChangeEvent::Removed(_) => "DELETED",
            ChangeEvent::StreamError(_) => "ERROR",
        }
    }
}
