//! Synthetic sleep workload and settings resolution

use crate::args::WorkloadArgs;
use async_trait::async_trait;
use std::time::Duration;
use throttle_core::config::load_from_file;
use throttle_core::{ActionResult, ThrottleConfig, ThrottleResult, WorkAction};

/// Item `i` sleeps `i * unit_delay`, so later items are slower
#[derive(Debug, Clone)]
pub struct SleepWorkload {
    unit_delay_ms: u64,
    fail_item: Option<u64>,
}

impl SleepWorkload {
    pub fn new(unit_delay_ms: u64) -> Self {
        Self {
            unit_delay_ms,
            fail_item: None,
        }
    }

    pub fn failing_on(mut self, item: Option<u64>) -> Self {
        self.fail_item = item;
        self
    }
}

#[async_trait]
impl WorkAction<u64> for SleepWorkload {
    async fn run(&self, item: u64) -> ActionResult {
        tokio::time::sleep(Duration::from_millis(item.saturating_mul(self.unit_delay_ms))).await;
        if self.fail_item == Some(item) {
            anyhow::bail!("simulated failure for item {}", item);
        }
        Ok(())
    }
}

/// Defaults, then the config file, then `THROTTLE_*` variables, then flags
pub fn resolve_config(args: &WorkloadArgs) -> ThrottleResult<ThrottleConfig> {
    let mut config = load_from_file(&args.config)?;
    config.apply_env_overrides()?;

    if let Some(max) = args.max_concurrency {
        config.max_concurrency = max;
    }
    if let Some(dispatch) = args.dispatch {
        config.dispatch = dispatch.into();
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::DispatchArg;
    use std::fs;
    use tempfile::TempDir;
    use throttle_core::DispatchMode;

    fn workload_args(config: std::path::PathBuf) -> WorkloadArgs {
        WorkloadArgs {
            items: 10,
            max_concurrency: None,
            unit_delay_ms: 1,
            dispatch: None,
            config,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("throttle.toml");
        fs::write(&path, "max_concurrency = 7\ndispatch = \"bounded\"\n").unwrap();

        let mut args = workload_args(path);
        let from_file = resolve_config(&args).unwrap();
        assert_eq!(from_file.dispatch, DispatchMode::Bounded);

        args.max_concurrency = Some(2);
        args.dispatch = Some(DispatchArg::Eager);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.dispatch, DispatchMode::Eager);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_workload_fails_selected_item() {
        let workload = SleepWorkload::new(5).failing_on(Some(3));
        assert!(workload.run(2).await.is_ok());

        let error = workload.run(3).await.unwrap_err();
        assert_eq!(error.to_string(), "simulated failure for item 3");
    }
}
