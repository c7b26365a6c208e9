//! Facility rows.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::{Facility, FacilityId};

use super::connection::Database;

const INSERT_FACILITY: &str = "INSERT INTO facilities (name) VALUES (?)";

const SELECT_FACILITY: &str = "SELECT id, name FROM facilities WHERE id = ?";

const LIST_FACILITIES: &str = "SELECT id, name FROM facilities ORDER BY name, id";

fn row_to_facility(row: &rusqlite::Row<'_>) -> rusqlite::Result<Facility> {
    Ok(Facility {
        id: FacilityId::new(row.get(0)?),
        name: row.get(1)?,
    })
}

impl Database {
    /// Seeds a facility.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a database error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use campground::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/campground.db")).unwrap();
    /// let facility = db.add_facility("North Shore").unwrap();
    /// assert_eq!(facility.name, "North Shore");
    /// ```
    pub fn add_facility(&mut self, name: &str) -> Result<Facility> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name".into(),
                message: "facility name must not be blank".into(),
            });
        }

        let tx = self.begin_immediate()?;
        tx.execute(INSERT_FACILITY, params![name])?;
        let id = FacilityId::new(tx.last_insert_rowid());
        tx.commit()?;

        log::info!("added facility {id} ({name})");
        Ok(Facility {
            id,
            name: name.to_string(),
        })
    }

    /// Looks up a facility.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_facility(conn: &Connection, id: FacilityId) -> Result<Option<Facility>> {
        Ok(conn
            .query_row(SELECT_FACILITY, params![id.value()], row_to_facility)
            .optional()?)
    }

    /// Lists facilities ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_facilities(conn: &Connection) -> Result<Vec<Facility>> {
        let mut stmt = conn.prepare(LIST_FACILITIES)?;
        let facilities = stmt
            .query_map([], row_to_facility)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(facilities)
    }
}
