//! Scheduled bulk deletion of every stored task.

use super::store::{TaskStoreResult, TaskStoreService};
use crate::task::ports::TaskRepository;
use mockable::Clock;
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Error returned when a purge schedule is configured with a zero period.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("purge period must be greater than zero")]
pub struct InvalidPurgePeriod;

/// Outcome of a schedule that has been stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Number of purge runs attempted.
    pub runs: usize,
    /// Total tasks removed across successful runs.
    pub deleted: usize,
    /// Number of runs that failed.
    pub failures: usize,
}

/// Periodically calls [`TaskStoreService::delete_all`].
///
/// The first purge happens one full period after [`ScheduledPurge::run`]
/// starts. A failed run is logged and counted; the schedule carries on with
/// the next tick rather than retrying.
pub struct ScheduledPurge<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskStoreService<R, C>,
    period: Duration,
}

impl<R, C> ScheduledPurge<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a schedule purging every `period`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurgePeriod`] when `period` is zero.
    pub fn new(
        service: TaskStoreService<R, C>,
        period: Duration,
    ) -> Result<Self, InvalidPurgePeriod> {
        if period.is_zero() {
            return Err(InvalidPurgePeriod);
        }
        Ok(Self { service, period })
    }

    /// Returns the configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Performs a single purge immediately.
    ///
    /// # Errors
    ///
    /// Propagates the store failure unchanged.
    pub async fn run_once(&self) -> TaskStoreResult<usize> {
        self.service.delete_all().await
    }

    /// Runs the schedule until `shutdown` is cancelled.
    pub async fn run(&self, shutdown: CancellationToken) -> PurgeReport {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        let mut report = PurgeReport::default();
        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    report.runs += 1;
                    match self.run_once().await {
                        Ok(deleted) => {
                            report.deleted += deleted;
                            tracing::info!(deleted, run = report.runs, "scheduled purge completed");
                        }
                        Err(err) => {
                            report.failures += 1;
                            tracing::error!(error = %err, run = report.runs, "scheduled purge failed");
                        }
                    }
                }
            }
        }

        tracing::info!(
            runs = report.runs,
            deleted = report.deleted,
            failures = report.failures,
            "purge schedule stopped"
        );
        report
    }
}
