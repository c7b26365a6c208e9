//! Schema initialization and version checks.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{ALL_TABLES, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION};

const METADATA_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'";

/// Creates every table and index and records the current version.
///
/// # Errors
///
/// Returns an error if any statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use campground::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in ALL_TABLES {
        conn.execute(statement, [])?;
    }
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    log::info!("initialized campground schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Reads the schema version, or 0 for an uninitialized database.
///
/// # Errors
///
/// Returns an error if the query fails or the stored version is not a number.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: i64 = conn.query_row(METADATA_EXISTS, [], |row| row.get(0))?;
    if has_metadata == 0 {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse::<i32>().map_err(|_| Error::DatabaseCorruption {
            details: format!("schema version '{value}' is not a number"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Initializes a fresh database or verifies an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version
/// differs from [`CURRENT_SCHEMA_VERSION`], or a database error.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        return initialize_schema(conn);
    }

    if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
