//! Shared fixtures for database unit tests.

use chrono::{DateTime, NaiveDate, Utc};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{
    CampsiteId, Capacity, FacilityId, NewCampsite, NewReservation, Reservation, StayDates, UserId,
};

/// Opens a database in a temporary directory that outlives the test.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the process.
    std::mem::forget(dir);

    db
}

/// Adds a facility named "Test Facility".
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_facility(db: &mut Database) -> FacilityId {
    db.add_facility("Test Facility").unwrap().id
}

/// Inserts an active campsite with a generated unique name and no
/// attributes or equipment.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_campsite(db: &mut Database, facility: FacilityId, capacity: u32) -> CampsiteId {
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM campsites", [], |row| row.get(0))
        .unwrap();
    let campsite = NewCampsite::builder(
        facility,
        "A",
        format!("site-{}", count + 1),
        Capacity::try_from(capacity).unwrap(),
    )
    .build()
    .unwrap();

    let tx = db.begin_immediate().unwrap();
    let id = Database::insert_campsite_in(&tx, &campsite).unwrap();
    tx.commit().unwrap();
    id
}

/// Inserts a reservation directly, bypassing admission rules.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn insert_reservation_at(
    db: &mut Database,
    user: i64,
    campsite: CampsiteId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    created_at: DateTime<Utc>,
) -> Reservation {
    let request = NewReservation::new(
        UserId::new(user),
        campsite,
        StayDates::new(check_in, check_out),
    );
    let tx = db.begin_immediate().unwrap();
    let reservation = Database::insert_reservation_in(&tx, &request, created_at).unwrap();
    tx.commit().unwrap();
    reservation
}
