//! Library exports for campground-cli.
//!
//! The binary is a thin wrapper over [`run`]; keeping the command tree in a
//! library lets integration tests and tooling reach it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;

use cli::Command;
use error::CliError;
use utils::GlobalOptions;

/// Executes the parsed command line.
///
/// # Errors
///
/// Returns the failure of the selected command, carrying its exit code.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        today: cli.today,
        format: cli.format,
    };

    match cli.command {
        Command::Facility(cmd) => cmd.execute(&global),
        Command::Catalog(cmd) => cmd.execute(&global),
        Command::Campsite(cmd) => cmd.execute(&global),
        Command::Reservation(cmd) => cmd.execute(&global),
    }
}
