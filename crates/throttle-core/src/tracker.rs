//! In-flight and peak concurrency tracking

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts actions that are currently executing and remembers the highest count seen.
///
/// Both counters are plain atomics, so `enter`/`exit` never block and can be
/// called from any number of tasks at once.
#[derive(Debug, Default)]
pub struct ConcurrencyTracker {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action starting. Returns the in-flight count including this one.
    pub fn enter(&self) -> usize {
        let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        // Every caller publishes its own post-increment value, so the true
        // maximum is always offered to `peak`.
        self.peak.fetch_max(current, Ordering::SeqCst);
        current
    }

    /// Record an action finishing. Returns the remaining in-flight count.
    pub fn exit(&self) -> usize {
        let previous = self.current.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "exit() called without a matching enter()");
        previous - 1
    }

    /// Enter and return a guard that exits when dropped
    pub fn track(self: &Arc<Self>) -> InFlightGuard {
        let level = self.enter();
        InFlightGuard {
            tracker: Arc::clone(self),
            level,
        }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Clear the peak for a fresh run. Must only be called while nothing is in flight.
    pub fn reset(&self) {
        self.current.store(0, Ordering::SeqCst);
        self.peak.store(0, Ordering::SeqCst);
    }
}

/// RAII guard for one in-flight action
#[derive(Debug)]
pub struct InFlightGuard {
    tracker: Arc<ConcurrencyTracker>,
    level: usize,
}

impl InFlightGuard {
    /// In-flight count observed when this guard entered
    pub fn level(&self) -> usize {
        self.level
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tracker.exit();
    }
}
