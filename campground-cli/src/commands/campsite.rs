//! `campsite` command implementation.

use campground::{
    Campsite, CampsiteAttribute, CampsiteId, Capacity, FacilityId, NewCampsite, OutputFormat,
};
use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{
    load_configuration, note, open_service, parse_attribute, print_json, print_table, require,
    GlobalOptions,
};

const CAMPSITE_HEADERS: [&str; 6] = ["id", "facility", "loop", "name", "capacity", "active"];

/// Manage campsites.
#[derive(Args)]
pub struct CampsiteCommand {
    #[command(subcommand)]
    pub action: CampsiteAction,
}

/// Campsite subcommands.
#[derive(Subcommand)]
pub enum CampsiteAction {
    /// Add a campsite and print its id
    Add(AddArgs),

    /// Show a campsite with its attributes and equipment
    Show {
        /// Campsite id
        #[arg(long)]
        id: i64,
    },

    /// List the campsites of a facility
    List {
        /// Facility id
        #[arg(long)]
        facility: i64,
    },

    /// Make an inactive campsite bookable again
    Enable {
        /// Campsite id
        #[arg(long)]
        id: i64,
    },

    /// Deactivate a campsite, cancelling its reservations
    Disable {
        /// Campsite id
        #[arg(long)]
        id: i64,
    },

    /// Delete a campsite with its reservations, attributes and equipment
    Delete {
        /// Campsite id
        #[arg(long)]
        id: i64,
    },

    /// Change capacity, evicting the newest reservations on overbooked days
    Capacity {
        /// Campsite id
        #[arg(long)]
        id: i64,

        /// New number of spots per day
        #[arg(long, value_parser = parse_capacity)]
        capacity: Capacity,
    },

    /// Show day-by-day availability across the booking horizon
    Availability {
        /// Campsite id
        #[arg(long)]
        id: i64,
    },
}

/// Arguments for `campsite add`.
#[derive(Args)]
pub struct AddArgs {
    /// Owning facility id
    #[arg(long)]
    pub facility: i64,

    /// Loop the campsite sits on
    #[arg(long = "loop", value_name = "LOOP")]
    pub loop_name: String,

    /// Campsite name
    #[arg(long)]
    pub name: String,

    /// Number of spots per day
    #[arg(long, value_parser = parse_capacity)]
    pub capacity: Capacity,

    /// Attribute as NAME=VALUE (repeatable)
    #[arg(long = "attribute", value_name = "NAME=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<CampsiteAttribute>,

    /// Equipment name (repeatable)
    #[arg(long = "equipment", value_name = "NAME")]
    pub equipment: Vec<String>,
}

fn parse_capacity(s: &str) -> Result<Capacity, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("capacity must be a positive integer, got '{s}'"))?;
    Capacity::try_from(value).map_err(|e| e.message)
}

impl CampsiteCommand {
    /// Execute the campsite command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = config.output_format();
        let mut service = open_service(global, &config)?;

        match self.action {
            CampsiteAction::Add(args) => {
                let mut builder = NewCampsite::builder(
                    FacilityId::new(args.facility),
                    args.loop_name,
                    args.name,
                    args.capacity,
                )
                .attributes(args.attributes);
                for name in args.equipment {
                    builder = builder.equipment(name);
                }
                let campsite = builder
                    .build()
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

                let id = service.add_campsite(&campsite)?;
                match format {
                    OutputFormat::Json => print_json(&service.get_campsite(id)?),
                    OutputFormat::Table => {
                        println!("{id}");
                        Ok(())
                    }
                }
            }

            CampsiteAction::Show { id } => {
                let details = service.campsite_details(CampsiteId::new(id))?;
                match format {
                    OutputFormat::Json => print_json(&details),
                    OutputFormat::Table => {
                        print_table(&CAMPSITE_HEADERS, &[campsite_row(&details.campsite)])?;
                        for attribute in &details.attributes {
                            println!("attribute\t{}\t{}", attribute.name, attribute.value);
                        }
                        for equipment in &details.equipment {
                            println!("equipment\t{equipment}");
                        }
                        Ok(())
                    }
                }
            }

            CampsiteAction::List { facility } => {
                let campsites = service.list_campsites(FacilityId::new(facility))?;
                match format {
                    OutputFormat::Json => print_json(&campsites),
                    OutputFormat::Table => {
                        let rows: Vec<_> = campsites.iter().map(campsite_row).collect();
                        print_table(&CAMPSITE_HEADERS, &rows)
                    }
                }
            }

            CampsiteAction::Enable { id } => {
                let enabled = service.enable_campsite(CampsiteId::new(id))?;
                require(enabled, || {
                    format!("campsite {id} was not enabled (missing or already active)")
                })?;
                note(global, &format!("campsite {id} enabled"));
                Ok(())
            }

            CampsiteAction::Disable { id } => {
                let disabled = service.disable_campsite(CampsiteId::new(id))?;
                require(disabled, || {
                    format!("campsite {id} was not disabled (missing or already inactive)")
                })?;
                note(global, &format!("campsite {id} disabled"));
                Ok(())
            }

            CampsiteAction::Delete { id } => {
                let deleted = service.delete_campsite(CampsiteId::new(id))?;
                require(deleted, || format!("campsite {id} not found"))?;
                note(global, &format!("campsite {id} deleted"));
                Ok(())
            }

            CampsiteAction::Capacity { id, capacity } => {
                let update = service.update_capacity(CampsiteId::new(id), capacity)?;
                require(update.applied, || format!("campsite {id} not found"))?;
                match format {
                    OutputFormat::Json => print_json(&update),
                    OutputFormat::Table => {
                        let rows: Vec<_> = update
                            .evicted
                            .iter()
                            .map(|r| {
                                vec![
                                    r.id().to_string(),
                                    r.user_id().to_string(),
                                    r.check_in().to_string(),
                                    r.check_out().to_string(),
                                ]
                            })
                            .collect();
                        note(
                            global,
                            &format!(
                                "campsite {id} capacity set to {capacity}, {} reservation(s) evicted",
                                rows.len()
                            ),
                        );
                        if rows.is_empty() {
                            Ok(())
                        } else {
                            print_table(&["evicted", "user", "check_in", "check_out"], &rows)
                        }
                    }
                }
            }

            CampsiteAction::Availability { id } => {
                let calendar = service.availabilities(CampsiteId::new(id))?;
                match format {
                    OutputFormat::Json => print_json(&calendar),
                    OutputFormat::Table => {
                        let rows: Vec<_> = calendar
                            .iter()
                            .map(|(date, available)| {
                                vec![date.to_string(), if available { "yes" } else { "no" }.to_string()]
                            })
                            .collect();
                        print_table(&["date", "available"], &rows)
                    }
                }
            }
        }
    }
}

fn campsite_row(campsite: &Campsite) -> Vec<String> {
    vec![
        campsite.id().to_string(),
        campsite.facility_id().to_string(),
        campsite.loop_name().to_string(),
        campsite.name().to_string(),
        campsite.capacity().to_string(),
        campsite.is_active().to_string(),
    ]
}
