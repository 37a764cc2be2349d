//! Throttle CLI application
//!
//! Drives a synthetic workload (item `i` sleeps `i * unit-delay-ms`) through the
//! bounded runner and prints the observed peak concurrency.
//!
//! ```bash
//! throttle run -m 10
//! throttle run --unthrottled
//! throttle compare --items 200 -m 5
//! RUST_LOG=throttle=debug throttle run -m 3
//! ```

mod args;
mod commands;
mod output;
mod router;
mod signal_handler;
mod workload;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set RUST_LOG=debug for verbose logging; --trace enables the per-item lines
    let filter = if cli.trace {
        EnvFilter::new("throttle=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    router::route(cli).await
}
