//! One unit of work: acquire, execute, release

use crate::action::WorkAction;
use crate::logging::RunLog;
use crate::tracker::ConcurrencyTracker;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::types::{Gate, UnitOutcome};

/// Everything a spawned unit needs, cloned per item
pub(super) struct WorkUnit<T: Send + 'static> {
    pub(super) index: usize,
    pub(super) action: Arc<dyn WorkAction<T>>,
    pub(super) tracker: Arc<ConcurrencyTracker>,
    pub(super) log: RunLog,
    pub(super) token: CancellationToken,
}

impl<T: Send + 'static> WorkUnit<T> {
    pub(super) async fn run(self, item: T, gate: Gate) -> (usize, UnitOutcome) {
        let outcome = self.execute(item, gate).await;
        (self.index, outcome)
    }

    async fn execute(&self, item: T, gate: Gate) -> UnitOutcome {
        let _permit = match gate {
            Gate::Open => {
                self.log.line(format_args!("Processing Item {}", self.index));
                None
            }
            Gate::Held(permit) => Some(permit),
            Gate::Pending(pool) => {
                self.log.line(format_args!(
                    "Processing Item {} - available slots in semaphore {}",
                    self.index,
                    pool.available_permits()
                ));
                match pool.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    // The pool is closed only when the run is cancelled
                    Err(_) => return UnitOutcome::Cancelled,
                }
            }
        };

        // Declared after the permit so it drops first: exit, then release.
        let in_flight = self.tracker.track();
        tracing::trace!(index = self.index, in_flight = in_flight.level(), "unit entered");
        self.log.line(format_args!(
            "Item {} - Running {} in parallel",
            self.index,
            in_flight.level()
        ));

        let action = AssertUnwindSafe(self.action.run(item)).catch_unwind();

        tokio::select! {
            biased;
            _ = self.token.cancelled() => UnitOutcome::Cancelled,
            result = action => match result {
                Ok(Ok(())) => UnitOutcome::Completed,
                Ok(Err(error)) => UnitOutcome::Failed(error),
                Err(panic) => UnitOutcome::Failed(anyhow::anyhow!(
                    "action panicked: {}",
                    panic_message(panic.as_ref())
                )),
            },
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
