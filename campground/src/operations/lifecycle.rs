//! Campsite lifecycle: creation, lookup, enable/disable, deletion and the
//! capacity and availability entry points.
//!
//! A campsite moves between `Active` and `Inactive` and can be deleted from
//! either state. Disabling drops its reservations; deleting drops its
//! reservations, attributes and equipment together with the row.

use std::collections::HashSet;

use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode};

use crate::availability::{AvailabilityCalendar, BookingHorizon};
use crate::database::{Catalog, Database};
use crate::error::{Error, Result};
use crate::{Campsite, CampsiteDetails, CampsiteId, Capacity, FacilityId, NewCampsite};

use super::ports::{CampsiteDirectory, FacilityDirectory};
use super::reconcile::{CapacityReconciler, CapacityUpdate};

/// Campsite lifecycle operations.
pub struct CampsiteLifecycle;

impl CampsiteLifecycle {
    /// Creates an active campsite with its attributes and equipment.
    ///
    /// The facility is checked through `facilities`. Attribute and equipment
    /// names are resolved against their catalogs. Everything is written in
    /// one transaction; on any error nothing is stored.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the facility does not exist
    /// - [`Error::Conflict`] if an active campsite already uses the same
    ///   facility, loop and name
    /// - [`Error::InvalidAttribute`] for an unknown, repeated or blank-valued
    ///   attribute
    /// - [`Error::InvalidEquipment`] for unknown or repeated equipment
    pub fn add(
        db: &mut Database,
        facilities: &dyn FacilityDirectory,
        campsite: &NewCampsite,
    ) -> Result<CampsiteId> {
        let tx = db.begin_immediate()?;

        if facilities.get_facility(&tx, campsite.facility_id())?.is_none() {
            return Err(Error::NotFound {
                resource: format!("facility {}", campsite.facility_id()),
            });
        }

        if let Some(existing) = Database::find_active_campsite_in(
            &tx,
            campsite.facility_id(),
            campsite.loop_name(),
            campsite.name(),
        )? {
            return Err(identity_conflict(campsite, Some(existing)));
        }

        let id = Database::insert_campsite_in(&tx, campsite).map_err(|e| {
            if is_constraint_violation(&e) {
                identity_conflict(campsite, None)
            } else {
                e
            }
        })?;

        Self::attach_attributes(&tx, id, campsite)?;
        Self::attach_equipment(&tx, id, campsite)?;
        tx.commit()?;

        log::info!(
            "campsite {id} added: facility {} loop '{}' name '{}' capacity {}",
            campsite.facility_id(),
            campsite.loop_name(),
            campsite.name(),
            campsite.capacity()
        );
        Ok(id)
    }

    fn attach_attributes(conn: &Connection, id: CampsiteId, campsite: &NewCampsite) -> Result<()> {
        let mut seen = HashSet::new();
        for attribute in campsite.attributes() {
            let name = attribute.name.trim();
            if !seen.insert(name) {
                return Err(Error::InvalidAttribute {
                    name: name.to_string(),
                    reason: "listed more than once".into(),
                });
            }

            let attribute_id = Database::find_catalog_id_in(conn, Catalog::Attributes, name)?
                .ok_or_else(|| Error::InvalidAttribute {
                    name: name.to_string(),
                    reason: "unknown attribute".into(),
                })?;

            let value = attribute.value.trim();
            if value.is_empty() {
                return Err(Error::InvalidAttribute {
                    name: name.to_string(),
                    reason: "value must not be blank".into(),
                });
            }

            Database::insert_campsite_attribute_in(conn, id, attribute_id, value)?;
        }
        Ok(())
    }

    fn attach_equipment(conn: &Connection, id: CampsiteId, campsite: &NewCampsite) -> Result<()> {
        let mut seen = HashSet::new();
        for name in campsite.equipment() {
            let name = name.trim();
            if !seen.insert(name) {
                return Err(Error::InvalidEquipment {
                    name: name.to_string(),
                    reason: "listed more than once".into(),
                });
            }

            let equipment_id = Database::find_catalog_id_in(conn, Catalog::Equipment, name)?
                .ok_or_else(|| Error::InvalidEquipment {
                    name: name.to_string(),
                    reason: "unknown equipment".into(),
                })?;

            Database::insert_campsite_equipment_in(conn, id, equipment_id)?;
        }
        Ok(())
    }

    /// Fetches a campsite, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn get(db: &Database, id: CampsiteId) -> Result<Campsite> {
        Database::get_campsite(db.connection(), id)?.ok_or_else(|| Error::campsite_not_found(id))
    }

    /// Fetches a campsite with its attributes and equipment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn details(db: &Database, id: CampsiteId) -> Result<CampsiteDetails> {
        let campsite = Self::get(db, id)?;
        Ok(CampsiteDetails {
            attributes: Database::list_campsite_attributes(db.connection(), id)?,
            equipment: Database::list_campsite_equipment(db.connection(), id)?,
            campsite,
        })
    }

    /// Lists every campsite of a facility, active and inactive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the facility does not exist.
    pub fn list(
        db: &Database,
        facilities: &dyn FacilityDirectory,
        facility_id: FacilityId,
    ) -> Result<Vec<Campsite>> {
        if facilities.get_facility(db.connection(), facility_id)?.is_none() {
            return Err(Error::NotFound {
                resource: format!("facility {facility_id}"),
            });
        }
        Database::list_campsites(db.connection(), facility_id)
    }

    /// Deletes a campsite and everything attached to it. Returns false if
    /// the campsite did not exist, in which case nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; nothing is removed then.
    pub fn delete(db: &mut Database, id: CampsiteId) -> Result<bool> {
        let tx = db.begin_immediate()?;
        let reservations = Database::delete_reservations_for_campsite_in(&tx, id)?;
        let attributes = Database::delete_campsite_attributes_in(&tx, id)?;
        let equipment = Database::delete_campsite_equipment_in(&tx, id)?;

        if !Database::delete_campsite_in(&tx, id)? {
            log::debug!("campsite {id} not deleted: not found");
            return Ok(false);
        }
        tx.commit()?;

        log::info!(
            "campsite {id} deleted with {reservations} reservation(s), {attributes} attribute(s), {equipment} equipment item(s)"
        );
        Ok(true)
    }

    /// Deactivates a campsite and cancels all its reservations. Returns
    /// false if it is missing or already inactive; nothing changes then.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn disable(db: &mut Database, id: CampsiteId) -> Result<bool> {
        let tx = db.begin_immediate()?;
        let cancelled = Database::delete_reservations_for_campsite_in(&tx, id)?;

        if !Database::set_campsite_active_in(&tx, id, false)? {
            log::debug!("campsite {id} not disabled: missing or already inactive");
            return Ok(false);
        }
        tx.commit()?;

        log::info!("campsite {id} disabled, {cancelled} reservation(s) cancelled");
        Ok(true)
    }

    /// Reactivates a campsite. Returns false if it is missing or already
    /// active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if another active campsite has taken the
    /// same facility, loop and name in the meantime.
    pub fn enable(db: &mut Database, id: CampsiteId) -> Result<bool> {
        let tx = db.begin_immediate()?;
        let changed = match Database::set_campsite_active_in(&tx, id, true) {
            Ok(changed) => changed,
            Err(e) if is_constraint_violation(&e) => {
                return Err(Error::Conflict {
                    details: format!(
                        "campsite {id} cannot be enabled: another active campsite has the same facility, loop and name"
                    ),
                });
            }
            Err(e) => return Err(e),
        };
        tx.commit()?;

        if changed {
            log::info!("campsite {id} enabled");
        }
        Ok(changed)
    }

    /// Changes capacity, evicting excess reservations.
    ///
    /// # Errors
    ///
    /// See [`CapacityReconciler::update_capacity`].
    pub fn update_capacity(
        db: &mut Database,
        id: CampsiteId,
        capacity: Capacity,
    ) -> Result<CapacityUpdate> {
        CapacityReconciler::update_capacity(db, id, capacity)
    }

    /// Day-by-day availability across `horizon`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the campsite is missing or inactive.
    pub fn availabilities(
        db: &Database,
        campsites: &dyn CampsiteDirectory,
        id: CampsiteId,
        horizon: &BookingHorizon,
    ) -> Result<AvailabilityCalendar> {
        let campsite = campsites
            .get_active_campsite(db.connection(), id)?
            .ok_or_else(|| Error::campsite_not_found(id))?;
        let reservations = Database::list_reservations_by_campsite(db.connection(), id)?;
        Ok(AvailabilityCalendar::compute(&campsite, &reservations, horizon))
    }

    /// Reservations covering `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn taken_spots(db: &Database, id: CampsiteId, date: NaiveDate) -> Result<u32> {
        Database::count_taken_spots(db.connection(), id, date)
    }

    /// Whether at least one spot is free on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the campsite does not exist.
    pub fn is_available(db: &Database, id: CampsiteId, date: NaiveDate) -> Result<bool> {
        let campsite = Self::get(db, id)?;
        let taken = Self::taken_spots(db, id, date)?;
        Ok(taken < campsite.capacity().value())
    }
}

fn identity_conflict(campsite: &NewCampsite, existing: Option<CampsiteId>) -> Error {
    let holder = existing.map_or_else(String::new, |id| format!(" (campsite {id})"));
    Error::Conflict {
        details: format!(
            "an active campsite named '{}' already exists in loop '{}' of facility {}{holder}",
            campsite.name(),
            campsite.loop_name(),
            campsite.facility_id()
        ),
    }
}

fn is_constraint_violation(err: &Error) -> bool {
    matches!(
        err,
        Error::Database(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == ErrorCode::ConstraintViolation
    )
}
