//! Common test utilities for integration tests.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

use campground::database::{Database, DatabaseConfig};
use campground::{
    CampgroundService, CampsiteId, Capacity, FacilityId, FixedClock, NewCampsite, NewReservation,
    Reservation, StayDates, UserId,
};

/// The date every service built here believes is today.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

/// `today() + days`.
#[allow(dead_code)]
pub fn day(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Opens a fresh database in its own temporary directory. Keep the returned
/// `TempDir` alive for as long as the database is used.
#[allow(dead_code)]
pub fn open_database() -> (TempDir, PathBuf, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campground.db");
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    (dir, path, db)
}

/// A service on a fresh database with the clock pinned to [`today`].
#[allow(dead_code)]
pub fn service() -> (TempDir, CampgroundService) {
    let (dir, _, db) = open_database();
    let service = CampgroundService::new(db).with_clock(FixedClock::new(today()));
    (dir, service)
}

/// Adds a facility and returns its id.
#[allow(dead_code)]
pub fn add_facility(service: &mut CampgroundService) -> FacilityId {
    service.add_facility("Pine Lake").unwrap().id
}

/// Adds a bare campsite on loop "A".
#[allow(dead_code)]
pub fn add_campsite(
    service: &mut CampgroundService,
    facility: FacilityId,
    name: &str,
    capacity: u32,
) -> CampsiteId {
    let campsite = NewCampsite::builder(facility, "A", name, Capacity::try_from(capacity).unwrap())
        .build()
        .unwrap();
    service.add_campsite(&campsite).unwrap()
}

/// Books `[today + from, today + to]` for `user`.
#[allow(dead_code)]
pub fn book(
    service: &mut CampgroundService,
    user: i64,
    campsite: CampsiteId,
    from: i64,
    to: i64,
) -> campground::Result<Reservation> {
    service.create_reservation(&NewReservation::new(
        UserId::new(user),
        campsite,
        StayDates::new(day(from), day(to)),
    ))
}

/// Row count of `table`.
#[allow(dead_code)]
pub fn count_rows(db: &Database, table: &str) -> i64 {
    db.connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
