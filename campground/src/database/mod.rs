//! `SQLite` storage for facilities, campsites, catalogs and reservations.
//!
//! Read queries are associated functions taking a `&Connection`, so they
//! work equally on [`Database::connection`] and inside a transaction.
//! Mutations come in two forms: `&mut self` methods that open their own
//! `IMMEDIATE` transaction, and `_in` functions that run inside one the
//! caller already holds.
//!
//! # Examples
//!
//! ```no_run
//! use campground::database::{Database, DatabaseConfig};
//! use campground::UserId;
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/campground.db")).unwrap();
//! for reservation in Database::list_reservations_by_user(db.connection(), UserId::new(7)).unwrap() {
//!     println!("{} {}", reservation.id(), reservation.stay());
//! }
//! ```

mod campsites;
mod catalog;
mod config;
mod connection;
mod facilities;
pub mod migrations;
mod reservations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub use catalog::{Catalog, CatalogEntry};
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
