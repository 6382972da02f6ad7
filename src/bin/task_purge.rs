//! Deletes every stored task on a fixed schedule.
//!
//! Usage:
//!
//! ```text
//! task_purge [--once]
//! ```
//!
//! Configuration is read from the environment (see [`tasklist::config`]).
//! The process opens a connection pool, ensures the `tasks` schema exists and
//! then purges every `TASKLIST_PURGE_INTERVAL_SECS` until interrupted with
//! Ctrl-C. With `--once` a single purge runs and the process exits.
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use mockable::DefaultClock;
use std::sync::Arc;
use tasklist::config::StoreConfig;
use tasklist::task::{
    adapters::postgres::{PostgresTaskRepository, apply_schema, build_pool},
    services::{ScheduledPurge, TaskStoreService},
};
use thiserror::Error;
use tokio::runtime::Builder;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum ArgsError {
    #[error("unknown argument '{0}'; expected --once")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scheduled,
    Once,
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let mode = parse_args(std::env::args().skip(1))?;
    let config = StoreConfig::from_env()?;
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(config, mode))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Mode, ArgsError> {
    match args.next() {
        None => Ok(Mode::Scheduled),
        Some(arg) if arg == "--once" => Ok(Mode::Once),
        Some(other) => Err(ArgsError::Unknown(other)),
    }
}

async fn run(config: StoreConfig, mode: Mode) -> Result<(), BoxError> {
    let pool_config = config.clone();
    let pool = tokio::task::spawn_blocking(move || {
        let pool = build_pool(&pool_config)?;
        apply_schema(&pool)?;
        Ok::<_, BoxError>(pool)
    })
    .await??;

    let service = TaskStoreService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let purge = ScheduledPurge::new(service, config.purge_interval())?;

    if mode == Mode::Once {
        let deleted = purge.run_once().await?;
        tracing::info!(deleted, "one-off purge completed");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
        }
        signal_token.cancel();
    });

    tracing::info!(period_secs = purge.period().as_secs(), "starting scheduled purge");
    purge.run(shutdown).await;
    Ok(())
}
