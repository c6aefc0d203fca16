// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Finalizer manipulation shared by the persistence strategies.

use crate::types::resource::WatchedResource;
use kube::api::DynamicObject;
use serde_json::{json, Value};

/// Remove every occurrence of `finalizer`, keeping the remaining tokens in
/// their original order. Returns `None` when the token was not present.
pub fn strip_finalizer(finalizers: &[String], finalizer: &str) -> Option<Vec<String>> {
    let remaining: Vec<String> = finalizers
        .iter()
        .filter(|f| f.as_str() != finalizer)
        .cloned()
        .collect();

    (remaining.len() != finalizers.len()).then_some(remaining)
}

/// Merge patch replacing the finalizer list
pub fn finalizers_patch(finalizers: &[String]) -> Value {
    json!({
        "metadata": {"finalizers": finalizers}
    })
}

/// Full snapshot with the finalizer list replaced. The resource version is
/// kept so the store rejects the write if the object changed meanwhile.
pub fn with_finalizers(resource: &WatchedResource, finalizers: Vec<String>) -> DynamicObject {
    let mut object = resource.object().clone();
    object.metadata.finalizers = Some(finalizers);
    object
}

pub fn join(finalizers: &[String]) -> String {
    finalizers.join(", ")
}
