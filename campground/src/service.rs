//! The campground facade.
//!
//! [`CampgroundService`] owns the database handle, the clock and the lookup
//! ports, and exposes every operation with the booking horizon computed from
//! the clock at call time.

use chrono::NaiveDate;

use crate::availability::{AvailabilityCalendar, BookingHorizon, DEFAULT_HORIZON_MONTHS};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::database::{Catalog, CatalogEntry, Database};
use crate::error::{Error, Result};
use crate::operations::{
    CampsiteDirectory, CampsiteLifecycle, CapacityUpdate, FacilityDirectory,
    ReservationOperations, ReservationValidator, SqlDirectory,
};
use crate::{
    Campsite, CampsiteDetails, CampsiteId, Capacity, Facility, FacilityId, NewCampsite,
    NewReservation, Reservation, ReservationId, UserId,
};

/// Entry point for facility, campsite and reservation operations.
///
/// # Examples
///
/// ```no_run
/// use campground::database::{Database, DatabaseConfig};
/// use campground::{CampgroundService, Capacity, NewCampsite, NewReservation, StayDates, UserId};
/// use chrono::Duration;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/campground.db")).unwrap();
/// let mut service = CampgroundService::new(db);
///
/// let facility = service.add_facility("Pine Lake").unwrap();
/// let campsite = NewCampsite::builder(facility.id, "A", "1", Capacity::try_from(2).unwrap())
///     .build()
///     .unwrap();
/// let campsite_id = service.add_campsite(&campsite).unwrap();
///
/// let today = service.horizon().first_day();
/// let stay = StayDates::new(today, today + Duration::days(2));
/// let reservation = service
///     .create_reservation(&NewReservation::new(UserId::new(1), campsite_id, stay))
///     .unwrap();
/// println!("booked reservation {}", reservation.id());
/// ```
pub struct CampgroundService {
    db: Database,
    clock: Box<dyn Clock>,
    horizon_months: u32,
    facilities: Box<dyn FacilityDirectory>,
    campsites: Box<dyn CampsiteDirectory>,
}

impl CampgroundService {
    /// Creates a service on the system clock with the default horizon.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db,
            clock: Box::new(SystemClock),
            horizon_months: DEFAULT_HORIZON_MONTHS,
            facilities: Box::new(SqlDirectory),
            campsites: Box::new(SqlDirectory),
        }
    }

    /// Creates a service using the horizon from `config`.
    #[must_use]
    pub fn from_config(db: Database, config: &Config) -> Self {
        Self::new(db).with_horizon_months(config.horizon_months())
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Sets how many months ahead reservations may end.
    #[must_use]
    pub const fn with_horizon_months(mut self, months: u32) -> Self {
        self.horizon_months = months;
        self
    }

    /// Replaces the facility lookup used when adding and listing campsites.
    #[must_use]
    pub fn with_facility_directory(mut self, facilities: impl FacilityDirectory + 'static) -> Self {
        self.facilities = Box::new(facilities);
        self
    }

    /// Replaces the campsite lookup used by admission and availability.
    #[must_use]
    pub fn with_campsite_directory(mut self, campsites: impl CampsiteDirectory + 'static) -> Self {
        self.campsites = Box::new(campsites);
        self
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Mutable access to the underlying database.
    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// The booking window as of the clock's current date.
    #[must_use]
    pub fn horizon(&self) -> BookingHorizon {
        BookingHorizon::new(self.clock.today(), self.horizon_months)
    }

    // Facilities

    /// Adds a facility.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn add_facility(&mut self, name: &str) -> Result<Facility> {
        self.db.add_facility(name)
    }

    /// Fetches a facility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn get_facility(&self, id: FacilityId) -> Result<Facility> {
        self.facilities
            .get_facility(self.db.connection(), id)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("facility {id}"),
            })
    }

    /// Lists all facilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_facilities(&self) -> Result<Vec<Facility>> {
        Database::list_facilities(self.db.connection())
    }

    // Catalogs

    /// Adds an attribute name to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if it already exists.
    pub fn add_attribute(&mut self, name: &str) -> Result<CatalogEntry> {
        self.db.add_catalog_entry(Catalog::Attributes, name)
    }

    /// Adds an equipment name to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if it already exists.
    pub fn add_equipment(&mut self, name: &str) -> Result<CatalogEntry> {
        self.db.add_catalog_entry(Catalog::Equipment, name)
    }

    /// Lists a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_catalog(&self, catalog: Catalog) -> Result<Vec<CatalogEntry>> {
        Database::list_catalog(self.db.connection(), catalog)
    }

    // Campsites

    /// Adds a campsite. See [`CampsiteLifecycle::add`].
    ///
    /// # Errors
    ///
    /// See [`CampsiteLifecycle::add`].
    pub fn add_campsite(&mut self, campsite: &NewCampsite) -> Result<CampsiteId> {
        CampsiteLifecycle::add(&mut self.db, self.facilities.as_ref(), campsite)
    }

    /// Fetches a campsite, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn get_campsite(&self, id: CampsiteId) -> Result<Campsite> {
        CampsiteLifecycle::get(&self.db, id)
    }

    /// Fetches a campsite with attributes and equipment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn campsite_details(&self, id: CampsiteId) -> Result<CampsiteDetails> {
        CampsiteLifecycle::details(&self.db, id)
    }

    /// Lists a facility's campsites.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the facility does not exist.
    pub fn list_campsites(&self, facility_id: FacilityId) -> Result<Vec<Campsite>> {
        CampsiteLifecycle::list(&self.db, self.facilities.as_ref(), facility_id)
    }

    /// Hard-deletes a campsite. False if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete fails.
    pub fn delete_campsite(&mut self, id: CampsiteId) -> Result<bool> {
        CampsiteLifecycle::delete(&mut self.db, id)
    }

    /// Disables a campsite, cancelling its reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn disable_campsite(&mut self, id: CampsiteId) -> Result<bool> {
        CampsiteLifecycle::disable(&mut self.db, id)
    }

    /// Re-enables a campsite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the identity is held by another active
    /// campsite.
    pub fn enable_campsite(&mut self, id: CampsiteId) -> Result<bool> {
        CampsiteLifecycle::enable(&mut self.db, id)
    }

    /// Changes capacity, evicting the newest reservations where needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataConsistency`] if an eviction falls short.
    pub fn update_capacity(&mut self, id: CampsiteId, capacity: Capacity) -> Result<CapacityUpdate> {
        CampsiteLifecycle::update_capacity(&mut self.db, id, capacity)
    }

    /// Availability for every day of the current horizon.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the campsite is missing or inactive.
    pub fn availabilities(&self, id: CampsiteId) -> Result<AvailabilityCalendar> {
        let horizon = self.horizon();
        CampsiteLifecycle::availabilities(&self.db, self.campsites.as_ref(), id, &horizon)
    }

    /// Reservations covering `date` on a campsite.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn taken_spots(&self, id: CampsiteId, date: NaiveDate) -> Result<u32> {
        CampsiteLifecycle::taken_spots(&self.db, id, date)
    }

    /// Whether a spot is free on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the campsite does not exist.
    pub fn is_available(&self, id: CampsiteId, date: NaiveDate) -> Result<bool> {
        CampsiteLifecycle::is_available(&self.db, id, date)
    }

    // Reservations

    /// Validates and stores a reservation stamped with the clock's `now`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the campsite is missing or inactive
    /// - [`Error::InvalidReservation`] if the dates fall outside the horizon
    /// - [`Error::Conflict`] if the user already holds an overlapping stay
    pub fn create_reservation(&mut self, request: &NewReservation) -> Result<Reservation> {
        let horizon = self.horizon();
        let created_at = self.clock.now();
        let validator = ReservationValidator::new(self.campsites.as_ref(), horizon);
        ReservationOperations::create(&mut self.db, &validator, request, created_at)
    }

    /// Fetches a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    pub fn get_reservation(&self, id: ReservationId) -> Result<Reservation> {
        ReservationOperations::get(&self.db, id)
    }

    /// A user's reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_user(&self, user_id: UserId) -> Result<Vec<Reservation>> {
        ReservationOperations::list_for_user(&self.db, user_id)
    }

    /// A campsite's reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_campsite(&self, campsite_id: CampsiteId) -> Result<Vec<Reservation>> {
        ReservationOperations::list_for_campsite(&self.db, campsite_id)
    }

    /// Cancels a reservation. False if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<bool> {
        ReservationOperations::cancel(&mut self.db, id)
    }

    /// Cancels a reservation owned by `user_id`. False if missing or owned
    /// by someone else.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn cancel_reservation_for_user(&mut self, id: ReservationId, user_id: UserId) -> Result<bool> {
        ReservationOperations::cancel_for_user(&mut self.db, id, user_id)
    }

    /// Cancels every reservation of a campsite. True iff any were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservations_for_campsite(&mut self, campsite_id: CampsiteId) -> Result<bool> {
        ReservationOperations::delete_all_for_campsite(&mut self.db, campsite_id)
    }
}
