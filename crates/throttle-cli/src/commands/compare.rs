//! `throttle compare`: the same workload with and without the limiter

use crate::args::WorkloadArgs;
use crate::output;
use crate::workload::{SleepWorkload, resolve_config};
use anyhow::Context;
use throttle_core::{RunReport, ThrottleConfig, ThrottledRunnerBuilder};

pub async fn execute(workload: &WorkloadArgs) -> anyhow::Result<()> {
    let config = resolve_config(workload)?;

    let throttled = run_once(workload, config.clone(), true)
        .await
        .context("throttled run failed")?;
    let unthrottled = run_once(workload, config.clone(), false)
        .await
        .context("unthrottled run failed")?;

    output::print_comparison(&throttled, &unthrottled, config.max_concurrency);
    Ok(())
}

async fn run_once(
    workload: &WorkloadArgs,
    config: ThrottleConfig,
    throttled: bool,
) -> anyhow::Result<RunReport> {
    let runner = ThrottledRunnerBuilder::new()
        .with_items(0..workload.items)
        .with_action(SleepWorkload::new(workload.unit_delay_ms))
        .with_config(config)
        .build()?;

    let report = if throttled {
        runner.run_throttled().await?
    } else {
        runner.run_unthrottled().await?
    };
    Ok(report)
}
