//! Builder pattern for ThrottledRunner

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::action::WorkAction;
use crate::config::{DispatchMode, ThrottleConfig};
use crate::error::{ThrottleError, ThrottleResult};
use crate::logging::{LineLogger, RunLog, TracingLineLogger};
use crate::tracker::ConcurrencyTracker;

use super::runner::{ItemSource, ThrottledRunner};

/// Builder for ThrottledRunner
pub struct ThrottledRunnerBuilder<T: Send + 'static> {
    config: ThrottleConfig,
    items: Option<ItemSource<T>>,
    action: Option<Arc<dyn WorkAction<T>>>,
    logger: Option<Arc<dyn LineLogger>>,
    cancellation_token: Option<CancellationToken>,
}

impl<T: Send + 'static> ThrottledRunnerBuilder<T> {
    pub fn new() -> Self {
        Self {
            config: ThrottleConfig::default(),
            items: None,
            action: None,
            logger: Some(Arc::new(TracingLineLogger)),
            cancellation_token: None,
        }
    }

    /// Items to process; the iterator is pulled lazily and at most once
    pub fn with_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        self.items = Some(Box::new(items.into_iter()));
        self
    }

    pub fn with_action<A>(mut self, action: A) -> Self
    where
        A: WorkAction<T> + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn with_shared_action(mut self, action: Arc<dyn WorkAction<T>>) -> Self {
        self.action = Some(action);
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ThrottleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.config.max_concurrency = max;
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.config.dispatch = dispatch;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn LineLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Drop the default tracing logger; runs emit no trace lines
    pub fn without_logger(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Validate and build. Nothing is dispatched until a run method is called.
    pub fn build(self) -> ThrottleResult<ThrottledRunner<T>> {
        let items = self.items.ok_or(ThrottleError::MissingComponent("items"))?;
        let action = self
            .action
            .ok_or(ThrottleError::MissingComponent("action"))?;
        self.config.validate()?;

        Ok(ThrottledRunner {
            items: Mutex::new(Some(items)),
            action,
            config: self.config,
            tracker: Arc::new(ConcurrencyTracker::new()),
            log: RunLog::new(self.logger),
            cancellation_token: self.cancellation_token.unwrap_or_default(),
        })
    }
}

impl<T: Send + 'static> Default for ThrottledRunnerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
