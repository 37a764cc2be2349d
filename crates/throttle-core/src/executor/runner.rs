//! ThrottledRunner struct and public API

use crate::action::WorkAction;
use crate::config::{DispatchMode, ThrottleConfig};
use crate::error::{ThrottleError, ThrottleResult};
use crate::logging::RunLog;
use crate::tracker::ConcurrencyTracker;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::types::{ExecutionMode, Gate, RunReport, Tally, UnitOutcome};
use super::unit::WorkUnit;

pub(super) type ItemSource<T> = Box<dyn Iterator<Item = T> + Send>;

/// Runs an action over every work item, with or without a concurrency cap.
///
/// A runner is built once per run through [`ThrottledRunnerBuilder`](super::ThrottledRunnerBuilder).
/// The item sequence is consumed by the first run; the peak concurrency of that
/// run stays readable afterwards, even when the run failed.
pub struct ThrottledRunner<T: Send + 'static> {
    pub(super) items: Mutex<Option<ItemSource<T>>>,
    pub(super) action: Arc<dyn WorkAction<T>>,
    pub(super) config: ThrottleConfig,
    pub(super) tracker: Arc<ConcurrencyTracker>,
    pub(super) log: RunLog,
    pub(super) cancellation_token: CancellationToken,
}

impl<T: Send + 'static> ThrottledRunner<T> {
    /// Execute every item, never letting more than `max_concurrency` actions run at once
    pub async fn run_throttled(&self) -> ThrottleResult<RunReport> {
        let pool = Arc::new(Semaphore::new(self.config.max_concurrency));
        self.log.line(format_args!(
            "Initialized semaphore with capacity of {} tasks",
            pool.available_permits()
        ));
        self.execute(ExecutionMode::Throttled, Some(pool)).await
    }

    /// Execute every item with no limiting at all
    pub async fn run_unthrottled(&self) -> ThrottleResult<RunReport> {
        self.execute(ExecutionMode::Unthrottled, None).await
    }

    /// Highest number of actions seen executing at once; 0 before any run
    pub fn peak_concurrency(&self) -> usize {
        self.tracker.peak()
    }

    /// Actions executing right now
    pub fn in_flight(&self) -> usize {
        self.tracker.current()
    }

    pub fn max_concurrency(&self) -> usize {
        self.config.max_concurrency
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Get a child cancellation token
    pub fn child_token(&self) -> CancellationToken {
        self.cancellation_token.child_token()
    }

    /// Cancel the run; waiting units return without executing
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    fn take_items(&self) -> ThrottleResult<ItemSource<T>> {
        self.items.lock().take().ok_or(ThrottleError::ItemsConsumed)
    }

    async fn execute(
        &self,
        mode: ExecutionMode,
        pool: Option<Arc<Semaphore>>,
    ) -> ThrottleResult<RunReport> {
        let items = self.take_items()?;
        self.tracker.reset();
        let started = Instant::now();

        info!(
            %mode,
            max_concurrency = self.config.max_concurrency,
            dispatch = %self.config.dispatch,
            "starting run"
        );

        let mut units = JoinSet::new();
        let mut dispatched = 0;
        let mut interrupted = false;

        for (index, item) in items.enumerate() {
            let gate = match &pool {
                None => Gate::Open,
                Some(pool) if self.config.dispatch == DispatchMode::Bounded => {
                    match self.acquire_for_dispatch(pool).await {
                        Some(permit) => Gate::Held(permit),
                        None => {
                            debug!(dispatched, "cancelled during dispatch");
                            interrupted = true;
                            break;
                        }
                    }
                }
                Some(pool) => Gate::Pending(Arc::clone(pool)),
            };

            let unit = WorkUnit {
                index,
                action: Arc::clone(&self.action),
                tracker: Arc::clone(&self.tracker),
                log: self.log.clone(),
                token: self.cancellation_token.clone(),
            };
            units.spawn(unit.run(item, gate));
            dispatched += 1;
        }

        let tally = self.join_units(&mut units, pool.as_deref()).await;
        let peak = self.tracker.peak();
        self.log.line(format_args!("Max concurrency achieved = {}", peak));

        let report = RunReport {
            mode,
            dispatched,
            completed: tally.completed,
            failed: tally.failures.len(),
            cancelled: tally.cancelled,
            peak_concurrency: peak,
            elapsed: started.elapsed(),
        };

        info!(
            %mode,
            dispatched = report.dispatched,
            completed = report.completed,
            failed = report.failed,
            cancelled = report.cancelled,
            peak_concurrency = report.peak_concurrency,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "run finished"
        );

        if !tally.failures.is_empty() {
            for failure in &tally.failures {
                warn!(index = failure.index, error = %failure.error, "work item failed");
                self.log.line(format_args!("Item {} failed: {:#}", failure.index, failure.error));
            }
            return Err(ThrottleError::ActionsFailed {
                failures: tally.failures,
                dispatched,
            });
        }

        if tally.cancelled > 0 || interrupted {
            warn!(completed = tally.completed, dispatched, "run cancelled");
            return Err(ThrottleError::Cancelled {
                completed: tally.completed,
                dispatched,
            });
        }

        Ok(report)
    }

    /// Wait for a permit before spawning; `None` once the run is cancelled
    async fn acquire_for_dispatch(&self, pool: &Arc<Semaphore>) -> Option<OwnedSemaphorePermit> {
        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => None,
            permit = Arc::clone(pool).acquire_owned() => permit.ok(),
        }
    }

    /// Join every unit. Cancellation closes the pool so units still waiting
    /// for a permit give up instead of executing.
    async fn join_units(
        &self,
        units: &mut JoinSet<(usize, UnitOutcome)>,
        pool: Option<&Semaphore>,
    ) -> Tally {
        let mut tally = Tally::default();
        let mut cancel_seen = false;

        loop {
            tokio::select! {
                _ = self.cancellation_token.cancelled(), if !cancel_seen => {
                    cancel_seen = true;
                    if let Some(pool) = pool {
                        pool.close();
                    }
                }
                joined = units.join_next() => match joined {
                    Some(Ok((index, outcome))) => tally.record(index, outcome),
                    Some(Err(join_error)) => {
                        warn!(error = %join_error, "unit did not run to completion");
                        tally.cancelled += 1;
                    }
                    None => break,
                },
            }
        }

        tally
    }
}

impl<T: Send + 'static> std::fmt::Debug for ThrottledRunner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottledRunner")
            .field("config", &self.config)
            .field("tracker", &self.tracker)
            .field("log", &self.log)
            .field("items_consumed", &self.items.lock().is_none())
            .finish()
    }
}
