//! Campsite rows and their attribute/equipment join rows.
//!
//! Functions ending in `_in` run against a caller-supplied connection or
//! transaction and never open one themselves; the lifecycle operations
//! compose them inside a single `IMMEDIATE` transaction.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::{Campsite, CampsiteAttribute, CampsiteId, Capacity, FacilityId, NewCampsite};

use super::connection::Database;

const SELECT_CAMPSITE: &str = r"
    SELECT id, facility_id, loop_name, name, capacity, active
    FROM campsites
    WHERE id = ?
";

const SELECT_ACTIVE_CAMPSITE: &str = r"
    SELECT id, facility_id, loop_name, name, capacity, active
    FROM campsites
    WHERE id = ? AND active = 1
";

const LIST_CAMPSITES_BY_FACILITY: &str = r"
    SELECT id, facility_id, loop_name, name, capacity, active
    FROM campsites
    WHERE facility_id = ?
    ORDER BY loop_name, name, id
";

const FIND_ACTIVE_BY_IDENTITY: &str = r"
    SELECT id FROM campsites
    WHERE facility_id = ? AND loop_name = ? AND name = ? AND active = 1
";

const INSERT_CAMPSITE: &str = r"
    INSERT INTO campsites (loop_name, name, facility_id, capacity, active)
    VALUES (?, ?, ?, ?, 1)
";

const SET_ACTIVE: &str = "UPDATE campsites SET active = ?2 WHERE id = ?1 AND active <> ?2";

const UPDATE_CAPACITY: &str = "UPDATE campsites SET capacity = ? WHERE id = ?";

const DELETE_CAMPSITE: &str = "DELETE FROM campsites WHERE id = ?";

const INSERT_CAMPSITE_ATTRIBUTE: &str =
    "INSERT INTO campsite_attributes (campsite_id, attribute_id, value) VALUES (?, ?, ?)";

const INSERT_CAMPSITE_EQUIPMENT: &str =
    "INSERT INTO campsite_equipment (campsite_id, equipment_id) VALUES (?, ?)";

const DELETE_CAMPSITE_ATTRIBUTES: &str = "DELETE FROM campsite_attributes WHERE campsite_id = ?";

const DELETE_CAMPSITE_EQUIPMENT: &str = "DELETE FROM campsite_equipment WHERE campsite_id = ?";

const LIST_CAMPSITE_ATTRIBUTES: &str = r"
    SELECT a.name, ca.value
    FROM campsite_attributes ca
    JOIN attributes a ON a.id = ca.attribute_id
    WHERE ca.campsite_id = ?
    ORDER BY a.name
";

const LIST_CAMPSITE_EQUIPMENT: &str = r"
    SELECT e.name
    FROM campsite_equipment ce
    JOIN equipment e ON e.id = ce.equipment_id
    WHERE ce.campsite_id = ?
    ORDER BY e.name
";

/// Expects columns: id, `facility_id`, `loop_name`, name, capacity, active.
fn row_to_campsite(row: &rusqlite::Row<'_>) -> rusqlite::Result<Campsite> {
    let capacity: u32 = row.get(4)?;
    let capacity = Capacity::try_from(capacity)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Integer, Box::new(e)))?;

    Ok(Campsite::new(
        CampsiteId::new(row.get(0)?),
        FacilityId::new(row.get(1)?),
        row.get(2)?,
        row.get(3)?,
        capacity,
        row.get(5)?,
    ))
}

impl Database {
    /// Fetches a campsite in any state.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_campsite(conn: &Connection, id: CampsiteId) -> Result<Option<Campsite>> {
        Ok(conn
            .query_row(SELECT_CAMPSITE, params![id.value()], row_to_campsite)
            .optional()?)
    }

    /// Fetches a campsite only if it is active.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_active_campsite(conn: &Connection, id: CampsiteId) -> Result<Option<Campsite>> {
        Ok(conn
            .query_row(SELECT_ACTIVE_CAMPSITE, params![id.value()], row_to_campsite)
            .optional()?)
    }

    /// Lists a facility's campsites, active and inactive, by loop then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_campsites(conn: &Connection, facility_id: FacilityId) -> Result<Vec<Campsite>> {
        let mut stmt = conn.prepare(LIST_CAMPSITES_BY_FACILITY)?;
        let campsites = stmt
            .query_map(params![facility_id.value()], row_to_campsite)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(campsites)
    }

    /// Finds the active campsite with the given facility, loop and name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active_campsite_in(
        conn: &Connection,
        facility_id: FacilityId,
        loop_name: &str,
        name: &str,
    ) -> Result<Option<CampsiteId>> {
        Ok(conn
            .query_row(
                FIND_ACTIVE_BY_IDENTITY,
                params![facility_id.value(), loop_name, name],
                |row| row.get(0).map(CampsiteId::new),
            )
            .optional()?)
    }

    /// Inserts the campsite row, active. Attributes and equipment are not
    /// written here.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_campsite_in(conn: &Connection, campsite: &NewCampsite) -> Result<CampsiteId> {
        conn.execute(
            INSERT_CAMPSITE,
            params![
                campsite.loop_name(),
                campsite.name(),
                campsite.facility_id().value(),
                campsite.capacity().value(),
            ],
        )?;
        Ok(CampsiteId::new(conn.last_insert_rowid()))
    }

    /// Sets the active flag. Returns false when the campsite is missing or
    /// already in the requested state.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_campsite_active_in(conn: &Connection, id: CampsiteId, active: bool) -> Result<bool> {
        let rows = conn.execute(SET_ACTIVE, params![id.value(), active])?;
        Ok(rows > 0)
    }

    /// Writes a new capacity. Returns false when the campsite is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_campsite_capacity_in(
        conn: &Connection,
        id: CampsiteId,
        capacity: Capacity,
    ) -> Result<bool> {
        let rows = conn.execute(UPDATE_CAPACITY, params![capacity.value(), id.value()])?;
        Ok(rows > 0)
    }

    /// Deletes the campsite row. Join rows and reservations must be gone first.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails, including a foreign-key failure
    /// when dependent rows remain.
    pub fn delete_campsite_in(conn: &Connection, id: CampsiteId) -> Result<bool> {
        let rows = conn.execute(DELETE_CAMPSITE, params![id.value()])?;
        Ok(rows > 0)
    }

    /// Attaches an attribute value to a campsite.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_campsite_attribute_in(
        conn: &Connection,
        campsite_id: CampsiteId,
        attribute_id: i64,
        value: &str,
    ) -> Result<()> {
        conn.execute(
            INSERT_CAMPSITE_ATTRIBUTE,
            params![campsite_id.value(), attribute_id, value],
        )?;
        Ok(())
    }

    /// Attaches an equipment item to a campsite.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_campsite_equipment_in(
        conn: &Connection,
        campsite_id: CampsiteId,
        equipment_id: i64,
    ) -> Result<()> {
        conn.execute(
            INSERT_CAMPSITE_EQUIPMENT,
            params![campsite_id.value(), equipment_id],
        )?;
        Ok(())
    }

    /// Removes every attribute row of a campsite, returning the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_campsite_attributes_in(conn: &Connection, id: CampsiteId) -> Result<usize> {
        Ok(conn.execute(DELETE_CAMPSITE_ATTRIBUTES, params![id.value()])?)
    }

    /// Removes every equipment row of a campsite, returning the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_campsite_equipment_in(conn: &Connection, id: CampsiteId) -> Result<usize> {
        Ok(conn.execute(DELETE_CAMPSITE_EQUIPMENT, params![id.value()])?)
    }

    /// Lists a campsite's attributes by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_campsite_attributes(
        conn: &Connection,
        id: CampsiteId,
    ) -> Result<Vec<CampsiteAttribute>> {
        let mut stmt = conn.prepare(LIST_CAMPSITE_ATTRIBUTES)?;
        let attributes = stmt
            .query_map(params![id.value()], |row| {
                Ok(CampsiteAttribute {
                    name: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(attributes)
    }

    /// Lists a campsite's equipment names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_campsite_equipment(conn: &Connection, id: CampsiteId) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(LIST_CAMPSITE_EQUIPMENT)?;
        let names = stmt
            .query_map(params![id.value()], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}
