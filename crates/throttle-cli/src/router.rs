//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Run {
            workload,
            unthrottled,
            fail_item,
        } => commands::run::execute(workload, *unthrottled, *fail_item).await,
        Commands::Compare { workload } => commands::compare::execute(workload).await,
    }
}
