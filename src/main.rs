// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finalizer_sweeper::config::{Cli, Config, PersistStrategy};
use finalizer_sweeper::kubernetes::{create_client, resolve_kind, ResolvedKind};
use finalizer_sweeper::reconcilers::{MergePatchPersister, Persister, Sweeper, UpdatePersister};
use finalizer_sweeper::watch::Subscription;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the sweeper's notices
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(cli).context("reading configuration")?;
    info!(
        "Starting finalizer sweeper: kind={} finalizer={} strategy={:?}",
        config.selector, config.finalizer, config.strategy
    );

    let client = create_client(&config)
        .await
        .context("connecting to the cluster")?;
    let kind = resolve_kind(&client, &config.selector)
        .await
        .with_context(|| format!("resolving watched kind {}", config.selector))?;

    // One watch for the whole run; it is closed when the sweeper returns
    let subscription = Subscription::open(client.clone(), &kind)
        .await
        .with_context(|| format!("opening watch on {}", kind.resource.plural))?;

    match config.strategy {
        PersistStrategy::Merge => {
            sweep(MergePatchPersister::new(client, &kind), subscription, &kind, &config).await
        }
        PersistStrategy::Update => {
            sweep(UpdatePersister::new(client, &kind), subscription, &kind, &config).await
        }
    }
}

async fn sweep<P: Persister>(
    persister: P,
    subscription: Subscription,
    kind: &ResolvedKind,
    config: &Config,
) -> Result<()> {
    let mut sweeper = Sweeper::new(
        persister,
        std::io::stdout(),
        &kind.resource.kind,
        &config.finalizer,
    )
    .with_persist_timeout(config.persist_timeout);

    sweeper
        .run(subscription)
        .await
        .with_context(|| format!("sweeping {}", kind.resource.plural))?;

    info!("Watch on {} ended", kind.resource.plural);
    Ok(())
}
