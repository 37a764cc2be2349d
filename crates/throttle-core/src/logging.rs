//! Diagnostic line logging for runs
//!
//! The runner formats human-readable trace lines (permit acquisition, in-flight
//! transitions, final peak) and hands them to an injected [`LineLogger`]. Each
//! line is prefixed with a local timestamp before it reaches the sink, so sinks
//! only store or forward text.

use chrono::Local;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Timestamp layout prepended to every line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Line-oriented sink for run diagnostics
#[cfg_attr(test, mockall::automock)]
pub trait LineLogger: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Forwards lines to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLineLogger;

impl LineLogger for TracingLineLogger {
    fn write_line(&self, line: &str) {
        tracing::debug!(target: "throttle::trace", "{}", line);
    }
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryLineLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLineLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Whether any captured line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl LineLogger for MemoryLineLogger {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Timestamping front end shared by every unit of a run
#[derive(Clone, Default)]
pub(crate) struct RunLog {
    sink: Option<Arc<dyn LineLogger>>,
}

impl RunLog {
    pub(crate) fn new(sink: Option<Arc<dyn LineLogger>>) -> Self {
        Self { sink }
    }

    pub(crate) fn line(&self, message: impl fmt::Display) {
        if let Some(sink) = &self.sink {
            let line = format!("{} - {}", Local::now().format(TIMESTAMP_FORMAT), message);
            sink.write_line(&line);
        }
    }
}

impl fmt::Debug for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLog")
            .field("enabled", &self.sink.is_some())
            .finish()
    }
}
