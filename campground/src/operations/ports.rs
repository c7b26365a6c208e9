//! Narrow read-only lookups that operations depend on.
//!
//! Operations never reach into other services directly. They ask a
//! [`FacilityDirectory`] or [`CampsiteDirectory`], which run against the
//! connection (or transaction) the operation already holds. [`SqlDirectory`]
//! answers both from the local store; tests substitute mocks.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::{Campsite, CampsiteId, Facility, FacilityId};

/// Looks up facilities.
#[cfg_attr(test, mockall::automock)]
pub trait FacilityDirectory {
    /// Returns the facility, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn get_facility(&self, conn: &Connection, id: FacilityId) -> Result<Option<Facility>>;
}

/// Looks up campsites that can currently be booked.
#[cfg_attr(test, mockall::automock)]
pub trait CampsiteDirectory {
    /// Returns the campsite if it exists and is active.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn get_active_campsite(&self, conn: &Connection, id: CampsiteId) -> Result<Option<Campsite>>;
}

/// Directory backed by the campground's own tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlDirectory;

impl FacilityDirectory for SqlDirectory {
    fn get_facility(&self, conn: &Connection, id: FacilityId) -> Result<Option<Facility>> {
        Database::get_facility(conn, id)
    }
}

impl CampsiteDirectory for SqlDirectory {
    fn get_active_campsite(&self, conn: &Connection, id: CampsiteId) -> Result<Option<Campsite>> {
        Database::get_active_campsite(conn, id)
    }
}
