// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{DEFAULT_KIND, SENTINEL_FINALIZER};
use crate::error::{Result, SweeperError};
use crate::types::selector::KindSelector;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// How the new finalizer list is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PersistStrategy {
    /// JSON merge patch of metadata.finalizers, no concurrency check
    Merge,
    /// Full replace guarded by the snapshot's resource version
    Update,
}

/// Removes a finalizer from objects of one kind once they are being deleted
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the kubeconfig file to use for this controller
    #[arg(long, env = "SWEEPER_KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Kind to watch: Kind, version/Kind or group/version/Kind
    #[arg(long, env = "SWEEPER_KIND", default_value = DEFAULT_KIND)]
    pub kind: String,

    /// Finalizer to remove from objects pending deletion
    #[arg(long, env = "SWEEPER_FINALIZER", default_value = SENTINEL_FINALIZER)]
    pub finalizer: String,

    #[arg(long, env = "SWEEPER_STRATEGY", value_enum, default_value_t = PersistStrategy::Merge)]
    pub strategy: PersistStrategy,

    /// Deadline for each write to the cluster
    #[arg(long, env = "SWEEPER_PERSIST_TIMEOUT", value_name = "SECONDS")]
    pub persist_timeout: Option<u64>,
}

/// Validated controller configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit kubeconfig; inferred from the environment when unset
    pub kubeconfig: Option<PathBuf>,
    pub selector: KindSelector,
    pub finalizer: String,
    pub strategy: PersistStrategy,
    pub persist_timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let selector: KindSelector = cli.kind.parse()?;

        let finalizer = cli.finalizer.trim().to_string();
        if finalizer.is_empty() {
            return Err(SweeperError::InvalidConfig(
                "finalizer must not be empty".to_string(),
            ));
        }

        let persist_timeout = match cli.persist_timeout {
            Some(0) => {
                return Err(SweeperError::InvalidConfig(
                    "persist timeout must be at least one second".to_string(),
                ))
            }
            other => other.map(Duration::from_secs),
        };

        Ok(Config {
            kubeconfig: cli.kubeconfig,
            selector,
            finalizer,
            strategy: cli.strategy,
            persist_timeout,
        })
    }
}
