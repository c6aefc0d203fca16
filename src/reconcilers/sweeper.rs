// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Finalizer sweeper - consumes watch events one at a time and strips the
//! controller's finalizer from objects that are being deleted.

use crate::error::{Result, SweeperError};
use crate::reconcilers::finalizer::{join, strip_finalizer};
use crate::reconcilers::persister::Persister;
use crate::types::resource::{ChangeEvent, WatchedResource};
use crate::watch::Subscription;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How a single event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Created or removed; reported only
    Observed,
    NotPendingDeletion,
    FinalizerAbsent,
    Persisted,
    /// The write failed or timed out; the loop carries on
    PersistFailed,
}

pub struct Sweeper<P, W> {
    persister: P,
    screen: W,
    kind: String,
    finalizer: String,
    persist_timeout: Option<Duration>,
}

impl<P: Persister, W: Write> Sweeper<P, W> {
    /// `kind` is the watched kind's name as served by the cluster, used in
    /// notices; notices are written to `screen`.
    pub fn new(persister: P, screen: W, kind: &str, finalizer: &str) -> Self {
        Self {
            persister,
            screen,
            kind: kind.to_string(),
            finalizer: finalizer.to_string(),
            persist_timeout: None,
        }
    }

    /// Bound each persistence call. An expired call counts as a failed write.
    pub fn with_persist_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.persist_timeout = timeout;
        self
    }

    #[cfg(test)]
    pub(crate) fn persister(&self) -> &P {
        &self.persister
    }

    #[cfg(test)]
    pub(crate) fn screen(&self) -> &W {
        &self.screen
    }

    /// Process events until the stream ends. A stream error or a payload of
    /// the wrong kind stops the loop; the subscription is closed either way.
    #[instrument(skip_all, fields(kind = %self.kind))]
    pub async fn run(&mut self, mut subscription: Subscription) -> Result<()> {
        let result = self.drain(&mut subscription).await;
        subscription.close();
        result
    }

    async fn drain(&mut self, subscription: &mut Subscription) -> Result<()> {
        while let Some(event) = subscription.next_event().await {
            let outcome = self.handle_event(event?).await?;
            debug!(?outcome, "Handled event");
        }

        info!("Watch stream ended");
        Ok(())
    }

    pub async fn handle_event(&mut self, event: ChangeEvent) -> Result<Outcome> {
        let verb = event.verb();
        match event {
            ChangeEvent::Created(resource) | ChangeEvent::Removed(resource) => {
                self.announce(verb, &resource)?;
                Ok(Outcome::Observed)
            }
            ChangeEvent::Updated(resource) => {
                self.announce(verb, &resource)?;
                self.remove_finalizer(resource).await
            }
            ChangeEvent::StreamError(message) => Err(SweeperError::StreamError(message)),
        }
    }

    /// Strip the finalizer from `resource` if it is pending deletion and
    /// still carries it. Persistence failures are reported, not returned.
    pub async fn remove_finalizer(&mut self, resource: WatchedResource) -> Result<Outcome> {
        if !resource.is_pending_deletion() {
            writeln!(
                self.screen,
                "{} is not candidate for deletion, not touching it",
                self.kind
            )?;
            return Ok(Outcome::NotPendingDeletion);
        }

        writeln!(
            self.screen,
            "{} is candidate for deletion, patching finalizers: {}",
            self.kind,
            join(resource.finalizers())
        )?;

        let Some(remaining) = strip_finalizer(resource.finalizers(), &self.finalizer) else {
            writeln!(self.screen, "Finalizer not found, nothing to do")?;
            return Ok(Outcome::FinalizerAbsent);
        };

        match self.persist(&resource, remaining).await {
            Ok(updated) => {
                info!(
                    "Removed finalizer {} from {}/{}",
                    self.finalizer,
                    resource.namespace().unwrap_or_default(),
                    resource.name()
                );
                writeln!(
                    self.screen,
                    "Finalizer removed. Current finalizers are: {}",
                    join(updated.finalizers())
                )?;
                Ok(Outcome::Persisted)
            }
            Err(e) => {
                warn!(
                    "Failed to remove finalizer from {}/{}: {}",
                    resource.namespace().unwrap_or_default(),
                    resource.name(),
                    e
                );
                writeln!(
                    self.screen,
                    "Failed to update {}: {}",
                    self.kind.to_lowercase(),
                    e
                )?;
                Ok(Outcome::PersistFailed)
            }
        }
    }

    async fn persist(
        &self,
        resource: &WatchedResource,
        finalizers: Vec<String>,
    ) -> Result<WatchedResource> {
        match self.persist_timeout {
            Some(limit) => tokio::time::timeout(limit, self.persister.persist(resource, finalizers))
                .await
                .unwrap_or_else(|_| Err(SweeperError::PersistTimeout(limit))),
            None => self.persister.persist(resource, finalizers).await,
        }
    }

    fn announce(&mut self, verb: &str, resource: &WatchedResource) -> Result<()> {
        writeln!(
            self.screen,
            "{} {}: name: {:?} namespace: {:?}",
            self.kind.to_uppercase(),
            verb,
            resource.name(),
            resource.namespace().unwrap_or_default()
        )?;
        Ok(())
    }
}
