//! Attribute and equipment name catalogs.
//!
//! Both catalogs are plain `(id, name)` tables with unique names. Campsites
//! reference entries by id; callers supply names, which are resolved here.

use std::fmt;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::connection::Database;

/// Which reference catalog an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    /// Attribute names (`shade`, `pets`, ...).
    Attributes,
    /// Equipment names (`fire ring`, `picnic table`, ...).
    Equipment,
}

impl Catalog {
    const fn table(self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Equipment => "equipment",
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attributes => write!(f, "attribute"),
            Self::Equipment => write!(f, "equipment"),
        }
    }
}

/// A catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Row id.
    pub id: i64,
    /// Unique name.
    pub name: String,
}

impl Database {
    /// Adds a name to a catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name and [`Error::Conflict`]
    /// when the name already exists.
    pub fn add_catalog_entry(&mut self, catalog: Catalog, name: &str) -> Result<CatalogEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name".into(),
                message: format!("{catalog} name must not be blank"),
            });
        }

        let tx = self.begin_immediate()?;
        let sql = format!("INSERT INTO {} (name) VALUES (?)", catalog.table());
        match tx.execute(&sql, params![name]) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                return Err(Error::Conflict {
                    details: format!("{catalog} '{name}' already exists"),
                });
            }
            Err(e) => return Err(e.into()),
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log::info!("added {catalog} '{name}'");
        Ok(CatalogEntry {
            id,
            name: name.to_string(),
        })
    }

    /// Lists a catalog ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_catalog(conn: &Connection, catalog: Catalog) -> Result<Vec<CatalogEntry>> {
        let sql = format!("SELECT id, name FROM {} ORDER BY name", catalog.table());
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([], |row| {
                Ok(CatalogEntry {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Resolves a name to its catalog id. Names are matched after trimming.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_catalog_id_in(conn: &Connection, catalog: Catalog, name: &str) -> Result<Option<i64>> {
        let sql = format!("SELECT id FROM {} WHERE name = ?", catalog.table());
        Ok(conn
            .query_row(&sql, params![name.trim()], |row| row.get(0))
            .optional()?)
    }
}
