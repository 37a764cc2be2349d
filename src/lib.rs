//! Bounded-concurrency fan-out execution
//!
//! Facade over [`throttle_core`]. See [`ThrottledRunnerBuilder`] for the entry point.
//!
//! ```no_run
//! use std::time::Duration;
//! use throttle::{ActionResult, ThrottledRunnerBuilder};
//!
//! async fn fetch(id: u32) -> ActionResult {
//!     tokio::time::sleep(Duration::from_millis(u64::from(id))).await;
//!     Ok(())
//! }
//!
//! # async fn demo() -> throttle::ThrottleResult<()> {
//! let runner = ThrottledRunnerBuilder::new()
//!     .with_items(0..100_u32)
//!     .with_action(fetch)
//!     .with_max_concurrency(8)
//!     .build()?;
//!
//! let report = runner.run_throttled().await?;
//! assert!(report.peak_concurrency <= 8);
//! # Ok(())
//! # }
//! ```

pub use throttle_core::*;
