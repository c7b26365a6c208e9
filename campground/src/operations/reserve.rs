//! Reservation admission and cancellation.
//!
//! Admission runs three checks in order: the campsite exists and is active,
//! the stay fits the booking horizon, and the user holds no overlapping
//! reservation on the same campsite. Total campsite occupancy is not
//! checked here; capacity is enforced reactively by
//! [`CapacityReconciler`](super::CapacityReconciler).

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::availability::BookingHorizon;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Campsite, CampsiteId, NewReservation, Reservation, ReservationId, UserId};

use super::ports::CampsiteDirectory;

/// Checks a reservation request against the admission rules.
pub struct ReservationValidator<'a> {
    campsites: &'a dyn CampsiteDirectory,
    horizon: BookingHorizon,
}

impl<'a> ReservationValidator<'a> {
    /// Creates a validator using `campsites` for the existence check.
    #[must_use]
    pub fn new(campsites: &'a dyn CampsiteDirectory, horizon: BookingHorizon) -> Self {
        Self { campsites, horizon }
    }

    /// The booking window in force.
    #[must_use]
    pub const fn horizon(&self) -> BookingHorizon {
        self.horizon
    }

    /// Validates `request`, returning the campsite being booked.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the campsite is missing or inactive
    /// - [`Error::InvalidReservation`] if the dates break the horizon rules
    /// - [`Error::Conflict`] if the user already holds an overlapping stay
    pub fn validate(&self, conn: &Connection, request: &NewReservation) -> Result<Campsite> {
        let campsite = self
            .campsites
            .get_active_campsite(conn, request.campsite_id)?
            .ok_or_else(|| Error::campsite_not_found(request.campsite_id))?;

        self.horizon.validate(&request.stay)?;

        if let Some(existing) = Database::find_overlapping_reservation_in(
            conn,
            request.user_id,
            request.campsite_id,
            &request.stay,
        )? {
            return Err(Error::Conflict {
                details: format!(
                    "user {} already holds reservation {} ({}) on campsite {}",
                    request.user_id,
                    existing.id(),
                    existing.stay(),
                    request.campsite_id
                ),
            });
        }

        Ok(campsite)
    }
}

/// Reservation operations.
///
/// Mutations run in a single `IMMEDIATE` transaction each. Reads run on the
/// plain connection.
pub struct ReservationOperations;

impl ReservationOperations {
    /// Validates and stores a reservation stamped with `created_at`.
    ///
    /// Validation and insert share one transaction.
    ///
    /// # Errors
    ///
    /// Returns the validation failure unchanged, or a database error.
    pub fn create(
        db: &mut Database,
        validator: &ReservationValidator<'_>,
        request: &NewReservation,
        created_at: DateTime<Utc>,
    ) -> Result<Reservation> {
        let tx = db.begin_immediate()?;
        validator.validate(&tx, request)?;
        let reservation = Database::insert_reservation_in(&tx, request, created_at)?;
        tx.commit()?;

        log::info!(
            "reservation {} created for user {} on campsite {} ({})",
            reservation.id(),
            reservation.user_id(),
            reservation.campsite_id(),
            reservation.stay()
        );
        Ok(reservation)
    }

    /// Fetches a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn get(db: &Database, id: ReservationId) -> Result<Reservation> {
        Database::get_reservation(db.connection(), id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Lists a user's reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_user(db: &Database, user_id: UserId) -> Result<Vec<Reservation>> {
        Database::list_reservations_by_user(db.connection(), user_id)
    }

    /// Lists a campsite's reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_campsite(db: &Database, campsite_id: CampsiteId) -> Result<Vec<Reservation>> {
        Database::list_reservations_by_campsite(db.connection(), campsite_id)
    }

    /// Deletes one reservation. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn cancel(db: &mut Database, id: ReservationId) -> Result<bool> {
        let deleted = db.delete_reservation(id)?;
        if deleted {
            log::info!("reservation {id} cancelled");
        }
        Ok(deleted)
    }

    /// Deletes one reservation on behalf of its owner. Returns false if it
    /// does not exist or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn cancel_for_user(db: &mut Database, id: ReservationId, user_id: UserId) -> Result<bool> {
        let tx = db.begin_immediate()?;
        let deleted = Database::delete_reservation_for_user_in(&tx, id, user_id)?;
        tx.commit()?;
        if deleted {
            log::info!("reservation {id} cancelled by user {user_id}");
        } else {
            log::debug!("reservation {id} not cancelled: missing or not owned by user {user_id}");
        }
        Ok(deleted)
    }

    /// Deletes every reservation of a campsite. True iff any were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_all_for_campsite(db: &mut Database, campsite_id: CampsiteId) -> Result<bool> {
        db.delete_reservations_for_campsite(campsite_id)
    }
}
