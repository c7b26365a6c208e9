//! `reservation` command implementation.

use campground::{
    CampsiteId, NewReservation, OutputFormat, Reservation, ReservationId, StayDates, UserId,
};
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Subcommand};

use crate::error::CliError;
use crate::utils::{load_configuration, note, open_service, print_json, print_table, require, GlobalOptions};

const RESERVATION_HEADERS: [&str; 6] = ["id", "user", "campsite", "check_in", "check_out", "created_at"];

/// Manage reservations.
#[derive(Args)]
pub struct ReservationCommand {
    #[command(subcommand)]
    pub action: ReservationAction,
}

/// Reservation subcommands.
#[derive(Subcommand)]
pub enum ReservationAction {
    /// Book a campsite and print the reservation id
    Add {
        /// Booking user id
        #[arg(long)]
        user: i64,

        /// Campsite id
        #[arg(long)]
        campsite: i64,

        /// First night (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        check_in: NaiveDate,

        /// Last day (YYYY-MM-DD), inclusive
        #[arg(long, value_name = "YYYY-MM-DD")]
        check_out: NaiveDate,
    },

    /// List reservations of a user or a campsite
    #[command(group(ArgGroup::new("owner").required(true).args(["user", "campsite"])))]
    List {
        /// User id
        #[arg(long)]
        user: Option<i64>,

        /// Campsite id
        #[arg(long)]
        campsite: Option<i64>,
    },

    /// Show one reservation
    Show {
        /// Reservation id
        #[arg(long)]
        id: i64,
    },

    /// Cancel a reservation
    Cancel {
        /// Reservation id
        #[arg(long)]
        id: i64,

        /// Only cancel if the reservation belongs to this user
        #[arg(long)]
        user: Option<i64>,
    },
}

impl ReservationCommand {
    /// Execute the reservation command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = config.output_format();
        let mut service = open_service(global, &config)?;

        match self.action {
            ReservationAction::Add {
                user,
                campsite,
                check_in,
                check_out,
            } => {
                let request = NewReservation::new(
                    UserId::new(user),
                    CampsiteId::new(campsite),
                    StayDates::new(check_in, check_out),
                );
                let reservation = service.create_reservation(&request)?;
                match format {
                    OutputFormat::Json => print_json(&reservation),
                    OutputFormat::Table => {
                        println!("{}", reservation.id());
                        Ok(())
                    }
                }
            }

            ReservationAction::List { user, campsite } => {
                let reservations = match (user, campsite) {
                    (Some(user), _) => service.list_reservations_for_user(UserId::new(user))?,
                    (None, Some(campsite)) => {
                        service.list_reservations_for_campsite(CampsiteId::new(campsite))?
                    }
                    (None, None) => {
                        return Err(CliError::InvalidArguments(
                            "one of --user or --campsite is required".into(),
                        ))
                    }
                };
                match format {
                    OutputFormat::Json => print_json(&reservations),
                    OutputFormat::Table => {
                        let rows: Vec<_> = reservations.iter().map(reservation_row).collect();
                        print_table(&RESERVATION_HEADERS, &rows)
                    }
                }
            }

            ReservationAction::Show { id } => {
                let reservation = service.get_reservation(ReservationId::new(id))?;
                match format {
                    OutputFormat::Json => print_json(&reservation),
                    OutputFormat::Table => {
                        print_table(&RESERVATION_HEADERS, &[reservation_row(&reservation)])
                    }
                }
            }

            ReservationAction::Cancel { id, user } => {
                let cancelled = match user {
                    Some(user) => service
                        .cancel_reservation_for_user(ReservationId::new(id), UserId::new(user))?,
                    None => service.cancel_reservation(ReservationId::new(id))?,
                };
                require(cancelled, || format!("reservation {id} was not cancelled"))?;
                note(global, &format!("reservation {id} cancelled"));
                Ok(())
            }
        }
    }
}

fn reservation_row(reservation: &Reservation) -> Vec<String> {
    vec![
        reservation.id().to_string(),
        reservation.user_id().to_string(),
        reservation.campsite_id().to_string(),
        reservation.check_in().to_string(),
        reservation.check_out().to_string(),
        reservation
            .created_at()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    ]
}
