//! Bounded-concurrency runner with semaphore-based permit control
//!
//! This module contains the runner split into focused submodules:
//! - `runner`: ThrottledRunner struct, both execution modes, unit joining
//! - `unit`: The acquire-execute-release sequence for one item
//! - `builder`: Validated construction
//! - `types`: Reports, gates and per-unit outcomes

mod builder;
mod runner;
mod types;
mod unit;


pub use builder::ThrottledRunnerBuilder;
pub use runner::ThrottledRunner;
pub use types::{ExecutionMode, RunReport};
