use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::error::HttpError;

use super::client::build_client;
use super::execution::{RequestOutcome, execute_get};
use super::{LoadSpec, OutcomeTally};

/// Aggregate of a finished run. Only produced once every request is terminal.
#[derive(Debug, Clone)]
pub struct RunResult {
    started_at: Instant,
    tally: OutcomeTally,
    requests_issued: u64,
    failed: u64,
    peak_in_flight: usize,
}

impl RunResult {
    pub(crate) const fn new(
        started_at: Instant,
        tally: OutcomeTally,
        requests_issued: u64,
        failed: u64,
        peak_in_flight: usize,
    ) -> Self {
        Self {
            started_at,
            tally,
            requests_issued,
            failed,
            peak_in_flight,
        }
    }

    #[must_use]
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    #[must_use]
    pub const fn tally(&self) -> &OutcomeTally {
        &self.tally
    }

    /// Requested total, regardless of how many requests failed.
    #[must_use]
    pub const fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    /// Highest number of requests that held an admission permit at once.
    #[must_use]
    pub const fn peak_in_flight(&self) -> usize {
        self.peak_in_flight
    }

    /// Requests that produced an HTTP status.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.tally.total()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[derive(Debug, Default)]
struct InFlightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightGauge {
    fn admit(&self) -> Admission<'_> {
        let now = self.current.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        self.peak.fetch_max(now, Ordering::AcqRel);
        Admission { gauge: self }
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }
}

struct Admission<'gauge> {
    gauge: &'gauge InFlightGauge,
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        self.gauge.current.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Builds the shared client and runs every request of `spec`.
///
/// # Errors
///
/// Fails only if the client cannot be built; per-request failures are logged
/// and counted in [`RunResult::failed`].
pub async fn run_load(spec: &LoadSpec) -> Result<RunResult, HttpError> {
    let client = build_client(spec)?;
    Ok(dispatch(&client, spec).await)
}

/// Blocks the calling thread on [`run_load`] inside a fresh multi-threaded
/// runtime.
///
/// # Errors
///
/// Returns an error if the runtime or the client cannot be built.
pub fn run_load_blocking(spec: &LoadSpec) -> Result<RunResult, HttpError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| HttpError::RuntimeBuildFailed { source })?;
    runtime.block_on(run_load(spec))
}

/// Spawns one task per request up front; each waits for a permit before its
/// network call and keeps it until the response body is drained or the
/// request has failed. Returns once every task has finished.
pub async fn dispatch(client: &Client, spec: &LoadSpec) -> RunResult {
    let started_at = Instant::now();
    let total_requests = spec.total_requests();
    let concurrency = spec.concurrency().min(Semaphore::MAX_PERMITS);
    let permits = Arc::new(Semaphore::new(concurrency));
    let gauge = Arc::new(InFlightGauge::default());
    let target = Arc::new(spec.target().clone());

    debug!(
        "Dispatching {} requests to {} with concurrency {}",
        total_requests, target, concurrency
    );

    let mut tasks = JoinSet::new();
    for _ in 0..total_requests {
        let permits = Arc::clone(&permits);
        let gauge = Arc::clone(&gauge);
        let target = Arc::clone(&target);
        let client = client.clone();
        tasks.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                error!("Admission semaphore closed before the request could run");
                return RequestOutcome::Failed;
            };
            let _admitted = gauge.admit();
            execute_get(&client, &target).await
        });
    }

    let mut tally = OutcomeTally::new();
    let mut failed: u64 = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(RequestOutcome::Completed(status)) => tally.record(status),
            Ok(RequestOutcome::Failed) => failed = failed.saturating_add(1),
            Err(err) => {
                error!("Request task failed: {}", err);
                failed = failed.saturating_add(1);
            }
        }
    }

    RunResult::new(started_at, tally, total_requests, failed, gauge.peak())
}
