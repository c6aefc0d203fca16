// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Strategies for writing a new finalizer list back to the cluster.

use crate::error::{Result, SweeperError};
use crate::kubernetes::ResolvedKind;
use crate::reconcilers::finalizer::{finalizers_patch, with_finalizers};
use crate::types::resource::WatchedResource;
use kube::api::{ApiResource, DynamicObject, Patch, PatchParams, PostParams};
use kube::{Api, Client};
use std::future::Future;
use tracing::{debug, instrument};

/// Writes a finalizer list to the stored object.
///
/// Implementations return the object as the store holds it after the write,
/// which is what callers report, not the list they asked for.
pub trait Persister {
    fn persist(
        &self,
        resource: &WatchedResource,
        finalizers: Vec<String>,
    ) -> impl Future<Output = Result<WatchedResource>> + Send;
}

/// Api handle scoped to the object's namespace, or cluster wide for
/// cluster-scoped kinds
#[derive(Clone)]
struct ObjectApi {
    client: Client,
    resource: ApiResource,
    namespaced: bool,
}

impl ObjectApi {
    fn new(client: Client, kind: &ResolvedKind) -> Self {
        Self {
            client,
            resource: kind.resource.clone(),
            namespaced: kind.namespaced,
        }
    }

    fn for_object(&self, resource: &WatchedResource) -> Api<DynamicObject> {
        match resource.namespace() {
            Some(ns) if self.namespaced => {
                Api::namespaced_with(self.client.clone(), &ns, &self.resource)
            }
            _ => Api::all_with(self.client.clone(), &self.resource),
        }
    }
}

/// Sends only the finalizer list as a JSON merge patch. No concurrency
/// check: the list overwrites whatever the store holds.
#[derive(Clone)]
pub struct MergePatchPersister {
    api: ObjectApi,
}

impl MergePatchPersister {
    pub fn new(client: Client, kind: &ResolvedKind) -> Self {
        Self {
            api: ObjectApi::new(client, kind),
        }
    }
}

impl Persister for MergePatchPersister {
    #[instrument(skip(self, resource, finalizers), fields(name = %resource.name()))]
    async fn persist(
        &self,
        resource: &WatchedResource,
        finalizers: Vec<String>,
    ) -> Result<WatchedResource> {
        let patch = finalizers_patch(&finalizers);
        debug!("Sending merge patch {}", patch);

        let updated = self
            .api
            .for_object(resource)
            .patch(&resource.name(), &PatchParams::default(), &Patch::Merge(&patch))
            .await?;

        Ok(WatchedResource::new(updated))
    }
}

/// Replaces the whole object, carrying the snapshot's resource version so
/// the store refuses the write when the object changed in between.
#[derive(Clone)]
pub struct UpdatePersister {
    api: ObjectApi,
}

impl UpdatePersister {
    pub fn new(client: Client, kind: &ResolvedKind) -> Self {
        Self {
            api: ObjectApi::new(client, kind),
        }
    }
}

impl Persister for UpdatePersister {
    #[instrument(skip(self, resource, finalizers), fields(name = %resource.name()))]
    async fn persist(
        &self,
        resource: &WatchedResource,
        finalizers: Vec<String>,
    ) -> Result<WatchedResource> {
        let name = resource.name();
        let object = with_finalizers(resource, finalizers);
        debug!(
            resource_version = ?resource.resource_version(),
            "Replacing object"
        );

        match self
            .api
            .for_object(resource)
            .replace(&name, &PostParams::default(), &object)
            .await
        {
            Ok(updated) => Ok(WatchedResource::new(updated)),
            Err(kube::Error::Api(err)) if err.code == 409 => Err(SweeperError::Conflict {
                namespace: resource.namespace().unwrap_or_default(),
                name,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
