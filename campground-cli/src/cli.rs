//! CLI structure and command definitions.

use std::path::PathBuf;

use campground::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::{CampsiteCommand, CatalogCommand, FacilityCommand, ReservationCommand};

/// Command-line front end for campground reservations.
#[derive(Parser)]
#[command(name = "campground")]
#[command(version, about = "Manage campsites, capacity and reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "CAMPGROUND_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "CAMPGROUND_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Do not create the data directory or database when missing
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Pretend today is this date
    #[arg(long, value_name = "YYYY-MM-DD", global = true, hide = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage facilities
    Facility(FacilityCommand),

    /// Manage attribute and equipment catalogs
    Catalog(CatalogCommand),

    /// Manage campsites, capacity and availability
    Campsite(CampsiteCommand),

    /// Manage reservations
    Reservation(ReservationCommand),
}
