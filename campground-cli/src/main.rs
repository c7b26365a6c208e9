//! Main entry point for the campground CLI.

use clap::Parser;

use campground_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = campground::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    match campground_cli::run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
