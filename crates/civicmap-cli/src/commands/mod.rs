//! Command implementations

mod nearby;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Nearby(args) => nearby::execute(args, cli.config.as_deref(), &output).await,
    }
}
