//! `throttle run`: one mode, one report

use crate::args::WorkloadArgs;
use crate::output;
use crate::signal_handler::cancel_on_interrupt;
use crate::workload::{SleepWorkload, resolve_config};
use throttle_core::ThrottledRunnerBuilder;
use tokio_util::sync::CancellationToken;

pub async fn execute(
    workload: &WorkloadArgs,
    unthrottled: bool,
    fail_item: Option<u64>,
) -> anyhow::Result<()> {
    let config = resolve_config(workload)?;
    let token = CancellationToken::new();

    let runner = ThrottledRunnerBuilder::new()
        .with_items(0..workload.items)
        .with_action(SleepWorkload::new(workload.unit_delay_ms).failing_on(fail_item))
        .with_config(config)
        .with_cancellation_token(token.clone())
        .build()?;

    let interrupt = cancel_on_interrupt(token.clone());
    let result = if unthrottled {
        runner.run_unthrottled().await
    } else {
        runner.run_throttled().await
    };
    token.cancel();
    let _ = interrupt.await;

    match result {
        Ok(report) => {
            output::print_report(&report, runner.max_concurrency());
            Ok(())
        }
        Err(error) => {
            output::print_failure(&error, runner.peak_concurrency());
            Err(error.into())
        }
    }
}
