// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweeperError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to build configuration: {0}")]
    KubeconfigError(String),

    #[error("Invalid kind selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Kind discovery failed: {0}")]
    DiscoveryError(String),

    #[error("Failed to watch {kind}")]
    WatchOpenError {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("watch error: {0}")]
    StreamError(String),

    #[error("unexpected object type: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Conflict updating {namespace}/{name}: object was modified concurrently")]
    Conflict { namespace: String, name: String },

    #[error("Persistence call timed out after {0:?}")]
    PersistTimeout(Duration),

    #[error("Failed to write output")]
    OutputError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SweeperError>;
