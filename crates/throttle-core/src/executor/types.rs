//! Type definitions for the runner

use crate::error::ItemFailure;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Which execution path produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Permit-gated, at most `max_concurrency` actions in flight
    Throttled,
    /// No limiting; every unit starts as soon as it is scheduled
    Unthrottled,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Throttled => write!(f, "throttled"),
            Self::Unthrottled => write!(f, "unthrottled"),
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: ExecutionMode,
    /// Units spawned
    pub dispatched: usize,
    /// Units whose action returned `Ok`
    pub completed: usize,
    /// Units whose action returned `Err` or panicked
    pub failed: usize,
    /// Units that stopped because the run was cancelled
    pub cancelled: usize,
    /// Highest number of actions observed executing at once
    pub peak_concurrency: usize,
    pub elapsed: Duration,
}

/// What a unit must do before it may execute
pub(super) enum Gate {
    /// Unthrottled: execute immediately
    Open,
    /// Eager dispatch: wait for a permit from the pool
    Pending(Arc<Semaphore>),
    /// Bounded dispatch: permit acquired before the unit was spawned
    Held(OwnedSemaphorePermit),
}

/// Terminal state of one unit
#[derive(Debug)]
pub(super) enum UnitOutcome {
    Completed,
    Failed(anyhow::Error),
    Cancelled,
}

/// Outcome counters accumulated while joining units
#[derive(Debug, Default)]
pub(super) struct Tally {
    pub(super) completed: usize,
    pub(super) cancelled: usize,
    pub(super) failures: Vec<ItemFailure>,
}

impl Tally {
    pub(super) fn record(&mut self, index: usize, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Completed => self.completed += 1,
            UnitOutcome::Cancelled => self.cancelled += 1,
            UnitOutcome::Failed(error) => self.failures.push(ItemFailure::new(index, error)),
        }
    }
}
