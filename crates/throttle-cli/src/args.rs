//! CLI argument definitions using clap
//!
//! - throttle run                   # Throttled run over the default workload
//! - throttle run --unthrottled     # Same workload with no limiting
//! - throttle compare               # Both modes back to back

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use throttle_core::DispatchMode;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "throttle.toml";

#[derive(Parser, Debug)]
#[command(name = "throttle")]
#[command(about = "Run a synthetic fan-out workload with a bounded number of concurrent actions")]
#[command(version)]
pub struct Cli {
    /// Emit per-item trace lines (equivalent to RUST_LOG=throttle=debug)
    #[arg(long, global = true)]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute the workload in one mode and print the report
    Run {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Skip the permit pool entirely
        #[arg(long)]
        unthrottled: bool,

        /// Make the action for this item fail
        #[arg(long)]
        fail_item: Option<u64>,
    },

    /// Run the workload throttled and unthrottled and compare peaks
    Compare {
        #[command(flatten)]
        workload: WorkloadArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct WorkloadArgs {
    /// Number of work items; item i sleeps i * unit-delay-ms
    #[arg(long, default_value_t = 100)]
    pub items: u64,

    /// Maximum concurrent actions (overrides config file and environment)
    #[arg(long, short = 'm')]
    pub max_concurrency: Option<usize>,

    /// Milliseconds of work per unit of item value
    #[arg(long, default_value_t = 1)]
    pub unit_delay_ms: u64,

    /// Unit creation strategy for throttled runs
    #[arg(long, value_enum)]
    pub dispatch: Option<DispatchArg>,

    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchArg {
    Eager,
    Bounded,
}

impl From<DispatchArg> for DispatchMode {
    fn from(arg: DispatchArg) -> Self {
        match arg {
            DispatchArg::Eager => DispatchMode::Eager,
            DispatchArg::Bounded => DispatchMode::Bounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["throttle", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                workload,
                unthrottled,
                fail_item,
            } => {
                assert_eq!(workload.items, 100);
                assert_eq!(workload.unit_delay_ms, 1);
                assert!(workload.max_concurrency.is_none());
                assert_eq!(workload.config, PathBuf::from(DEFAULT_CONFIG_FILE));
                assert!(!unthrottled);
                assert!(fail_item.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.trace);
    }

    #[test]
    fn test_compare_with_overrides() {
        let cli = Cli::try_parse_from([
            "throttle",
            "compare",
            "--items",
            "20",
            "-m",
            "3",
            "--dispatch",
            "bounded",
            "--trace",
        ])
        .unwrap();

        assert!(cli.trace);
        match cli.command {
            Commands::Compare { workload } => {
                assert_eq!(workload.items, 20);
                assert_eq!(workload.max_concurrency, Some(3));
                assert_eq!(workload.dispatch, Some(DispatchArg::Bounded));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_arg_conversion() {
        assert_eq!(DispatchMode::from(DispatchArg::Eager), DispatchMode::Eager);
        assert_eq!(DispatchMode::from(DispatchArg::Bounded), DispatchMode::Bounded);
    }
}
