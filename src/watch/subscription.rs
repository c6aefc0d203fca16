// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! A single, non-restarting watch over every namespace for one kind.

use crate::constants::watch::{INITIAL_RESOURCE_VERSION, TIMEOUT_SECS};
use crate::error::{Result, SweeperError};
use crate::kubernetes::ResolvedKind;
use crate::types::resource::{ChangeEvent, WatchedResource};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use kube::api::{ApiResource, DynamicObject, WatchEvent, WatchParams};
use kube::{Api, Client};
use tracing::{debug, info, instrument};

type RawEventStream = BoxStream<'static, kube::Result<WatchEvent<DynamicObject>>>;

/// Open watch stream yielding classified change events.
///
/// The stream ends when the server closes it; it is never re-opened.
/// Dropping the subscription drops the underlying response stream, which
/// ends the watch on the server, so every exit path releases it.
pub struct Subscription {
    resource: ApiResource,
    stream: RawEventStream,
}

impl Subscription {
    /// Start watching `kind` across all namespaces, without selectors.
    #[instrument(skip(client, kind), fields(plural = %kind.resource.plural))]
    pub async fn open(client: Client, kind: &ResolvedKind) -> Result<Self> {
        let api: Api<DynamicObject> = Api::all_with(client, &kind.resource);
        let params = WatchParams::default().timeout(TIMEOUT_SECS);

        let stream = api
            .watch(&params, INITIAL_RESOURCE_VERSION)
            .await
            .map_err(|source| SweeperError::WatchOpenError {
                kind: kind.resource.kind.clone(),
                source,
            })?;

        info!(
            "Watching {} in all namespaces (server closes the watch after {}s)",
            kind.resource.plural, TIMEOUT_SECS
        );
        Ok(Self::from_stream(kind.resource.clone(), stream))
    }

    /// Wrap an already open stream of raw watch events
    pub(crate) fn from_stream<S>(resource: ApiResource, stream: S) -> Self
    where
        S: Stream<Item = kube::Result<WatchEvent<DynamicObject>>> + Send + 'static,
    {
        Self {
            resource,
            stream: stream.boxed(),
        }
    }

    /// Wait for the next change event. `None` once the stream has ended.
    ///
    /// Errors reported by the stream arrive as [`ChangeEvent::StreamError`];
    /// an `Err` means the payload was not the watched kind.
    pub async fn next_event(&mut self) -> Option<Result<ChangeEvent>> {
        loop {
            match self.stream.next().await? {
                Ok(WatchEvent::Bookmark(bookmark)) => {
                    debug!(
                        resource_version = %bookmark.metadata.resource_version,
                        "Skipping bookmark"
                    );
                }
                Ok(event) => return Some(self.classify(event)),
                Err(e) => return Some(Ok(ChangeEvent::StreamError(e.to_string()))),
            }
        }
    }

    /// Stop the watch. Consumes the subscription, dropping the stream.
    pub fn close(self) {
        info!("Closing watch on {}", self.resource.plural);
    }

    fn classify(&self, event: WatchEvent<DynamicObject>) -> Result<ChangeEvent> {
        Ok(match event {
            WatchEvent::Added(object) => ChangeEvent::Created(self.checked(object)?),
            WatchEvent::Modified(object) => ChangeEvent::Updated(self.checked(object)?),
            WatchEvent::Deleted(object) => ChangeEvent::Removed(self.checked(object)?),
            WatchEvent::Error(status) => ChangeEvent::StreamError(format!(
                "{} ({}): {}",
                status.reason, status.code, status.message
            )),
            // Filtered out by next_event
            WatchEvent::Bookmark(_) => {
                return Err(SweeperError::StreamError("unexpected bookmark".to_string()))
            }
        })
    }

    /// Accept the payload only if it is the kind this subscription watches
    fn checked(&self, object: DynamicObject) -> Result<WatchedResource> {
        let matches = object
            .types
            .as_ref()
            .is_some_and(|t| {
                t.api_version == self.resource.api_version && t.kind == self.resource.kind
            });

        let resource = WatchedResource::new(object);
        if !matches {
            return Err(SweeperError::TypeMismatch {
                expected: format!("{}/{}", self.resource.api_version, self.resource.kind),
                found: resource
                    .type_name()
                    .unwrap_or_else(|| "<untyped object>".to_string()),
            });
        }

        Ok(resource)
    }
}
