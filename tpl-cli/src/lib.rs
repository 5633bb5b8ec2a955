//! Command-line front end for browsing Toronto Public Library branches.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod logging;
mod render;

pub use error::CliError;
pub use logging::init_logging;

use config::BrowseArgs;

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli, &mut stdout)
}

fn run_with(cli: Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = cli.browse.into_config()?;
    config.validate_sources()?;
    commands::run_command(&cli.command, &config, writer)
}

#[derive(Debug, Parser)]
#[command(
    name = "tplb",
    about = "Browse library branches, visit statistics and events",
    version
)]
struct Cli {
    #[command(flatten)]
    browse: BrowseArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// List branches, closest first when a location is configured.
    List {
        /// Case-insensitive text matched against branch names.
        #[arg(long, short, value_name = "text", default_value = "")]
        query: String,
    },
    /// Show one branch with its annual visits and events.
    Detail {
        /// Branch code, e.g. `AB`.
        #[arg(value_name = "code")]
        code: String,
    },
    /// Name the branch closest to the configured location.
    Nearest,
    /// Print the map region framing every branch.
    Region,
}

#[cfg(test)]
mod tests;
