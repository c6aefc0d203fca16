// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolving a kind selector against the cluster's API discovery

use crate::error::{Result, SweeperError};
use crate::types::selector::KindSelector;
use kube::api::ApiResource;
use kube::discovery::{pinned_kind, verbs, Scope};
use kube::Client;
use tracing::{debug, info, instrument};

/// A kind as served by the cluster
#[derive(Clone, Debug)]
pub struct ResolvedKind {
    pub resource: ApiResource,
    pub namespaced: bool,
}

/// Look the selector up in discovery and check the kind can be watched.
#[instrument(skip(client, selector), fields(kind = %selector))]
pub async fn resolve_kind(client: &Client, selector: &KindSelector) -> Result<ResolvedKind> {
    let (resource, capabilities) = pinned_kind(client, &selector.gvk())
        .await
        .map_err(|e| {
            SweeperError::DiscoveryError(format!("{} is not served by the cluster: {}", selector, e))
        })?;

    if !capabilities.supports_operation(verbs::WATCH) {
        return Err(SweeperError::DiscoveryError(format!(
            "{} does not support watch",
            selector
        )));
    }

    let namespaced = matches!(capabilities.scope, Scope::Namespaced);
    debug!(plural = %resource.plural, namespaced, "Resolved kind");
    info!("Kind {} is available as {}", selector, resource.plural);

    Ok(ResolvedKind {
        resource,
        namespaced,
    })
}
