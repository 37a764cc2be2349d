//! Throttle Core Library
//!
//! This crate runs an injected async action over a sequence of work items while
//! capping how many actions execute at once. It provides:
//! - A permit-gated runner (`run_throttled`) and an unlimited control path (`run_unthrottled`)
//! - A lock-free tracker recording in-flight and peak concurrency
//! - An optional, mockable line logger for diagnostic tracing
//! - File and environment backed configuration

pub mod action;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod tracker;

// Re-export commonly used types
pub use action::{ActionResult, WorkAction};
pub use config::{DispatchMode, ThrottleConfig};
pub use error::{ItemFailure, ThrottleError, ThrottleResult};
pub use executor::{ExecutionMode, RunReport, ThrottledRunner, ThrottledRunnerBuilder};
pub use logging::{LineLogger, MemoryLineLogger, TracingLineLogger};
pub use tracker::{ConcurrencyTracker, InFlightGuard};
