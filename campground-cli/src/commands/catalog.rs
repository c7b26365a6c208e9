//! `catalog` command implementation.

use campground::{Catalog, OutputFormat};
use clap::{Args, Subcommand, ValueEnum};

use crate::error::CliError;
use crate::utils::{load_configuration, open_service, print_json, print_table, GlobalOptions};

/// Manage the attribute and equipment catalogs.
#[derive(Args)]
pub struct CatalogCommand {
    #[command(subcommand)]
    pub action: CatalogAction,
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub enum CatalogAction {
    /// Add an attribute name
    AddAttribute {
        /// Attribute name
        #[arg(long)]
        name: String,
    },

    /// Add an equipment name
    AddEquipment {
        /// Equipment name
        #[arg(long)]
        name: String,
    },

    /// List a catalog
    List {
        /// Which catalog to list
        #[arg(long, value_enum)]
        kind: CatalogKind,
    },
}

/// Catalog selector.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Attribute names
    Attribute,
    /// Equipment names
    Equipment,
}

impl From<CatalogKind> for Catalog {
    fn from(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Attribute => Self::Attributes,
            CatalogKind::Equipment => Self::Equipment,
        }
    }
}

impl CatalogCommand {
    /// Execute the catalog command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;

        let entry = match self.action {
            CatalogAction::AddAttribute { name } => service.add_attribute(&name)?,
            CatalogAction::AddEquipment { name } => service.add_equipment(&name)?,
            CatalogAction::List { kind } => {
                let entries = service.list_catalog(kind.into())?;
                return match config.output_format() {
                    OutputFormat::Json => print_json(&entries),
                    OutputFormat::Table => {
                        let rows: Vec<_> = entries
                            .iter()
                            .map(|e| vec![e.id.to_string(), e.name.clone()])
                            .collect();
                        print_table(&["id", "name"], &rows)
                    }
                };
            }
        };

        match config.output_format() {
            OutputFormat::Json => print_json(&entry),
            OutputFormat::Table => {
                println!("{}", entry.id);
                Ok(())
            }
        }
    }
}
