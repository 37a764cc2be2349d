//! The per-item operation driven by the runner

use async_trait::async_trait;
use std::future::Future;

/// Outcome of one action invocation
pub type ActionResult = anyhow::Result<()>;

/// Operation performed once for every work item.
///
/// The runner treats the action as opaque: it only observes whether the returned
/// future resolved to `Ok`, `Err`, or panicked. Any `Fn(T) -> impl Future` closure
/// implements this trait, so most callers never name it.
#[async_trait]
pub trait WorkAction<T: Send + 'static>: Send + Sync {
    async fn run(&self, item: T) -> ActionResult;
}

#[async_trait]
impl<T, F, Fut> WorkAction<T> for F
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send + 'static,
{
    async fn run(&self, item: T) -> ActionResult {
        (self)(item).await
    }
}
