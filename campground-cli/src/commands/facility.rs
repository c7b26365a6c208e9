//! `facility` command implementation.

use campground::{Facility, OutputFormat};
use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{load_configuration, open_service, print_json, print_table, GlobalOptions};

/// Manage facilities.
#[derive(Args)]
pub struct FacilityCommand {
    #[command(subcommand)]
    pub action: FacilityAction,
}

/// Facility subcommands.
#[derive(Subcommand)]
pub enum FacilityAction {
    /// Add a facility and print its id
    Add {
        /// Facility name
        #[arg(long)]
        name: String,
    },

    /// List facilities
    List,
}

impl FacilityCommand {
    /// Execute the facility command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;

        match self.action {
            FacilityAction::Add { name } => {
                let facility = service.add_facility(&name)?;
                match config.output_format() {
                    OutputFormat::Json => print_json(&facility),
                    OutputFormat::Table => {
                        println!("{}", facility.id);
                        Ok(())
                    }
                }
            }
            FacilityAction::List => {
                let facilities = service.list_facilities()?;
                match config.output_format() {
                    OutputFormat::Json => print_json(&facilities),
                    OutputFormat::Table => print_table(&["id", "name"], &rows(&facilities)),
                }
            }
        }
    }
}

fn rows(facilities: &[Facility]) -> Vec<Vec<String>> {
    facilities
        .iter()
        .map(|f| vec![f.id.to_string(), f.name.clone()])
        .collect()
}
