// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from an explicit or inferred kubeconfig

use crate::config::Config;
use crate::error::{Result, SweeperError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Create a Kubernetes client, from the configured kubeconfig file when one
/// is given, otherwise from the environment (in-cluster, `$KUBECONFIG`,
/// `~/.kube/config`).
#[instrument(skip(config), fields(kubeconfig = ?config.kubeconfig))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let client_config = match &config.kubeconfig {
        Some(path) => config_from_file(path).await?,
        None => {
            debug!("No kubeconfig given, inferring configuration");
            KConfig::infer().await.map_err(|e| {
                SweeperError::KubeconfigError(format!("Failed to infer config: {}", e))
            })?
        }
    };

    info!("Using cluster at {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| SweeperError::KubeconfigError(format!("Failed to create client: {}", e)))
}

async fn config_from_file(path: &Path) -> Result<KConfig> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        SweeperError::KubeconfigError(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    config_from_kubeconfig(&contents).await
}

/// Build a client configuration from kubeconfig YAML
async fn config_from_kubeconfig(kubeconfig: &str) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| SweeperError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| SweeperError::KubeconfigError(format!("Failed to create config: {}", e)))
}
