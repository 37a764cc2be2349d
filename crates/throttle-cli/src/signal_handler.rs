//! Ctrl+C handling for long-running workloads

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancel `token` on the first Ctrl+C. The task ends quietly once the token is
/// cancelled by anything else.
pub fn cancel_on_interrupt(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    tracing::warn!("interrupt received, cancelling run");
                    token.cancel();
                }
                Err(e) => tracing::error!(error = %e, "failed to listen for Ctrl+C"),
            },
        }
    })
}
