//! Database connection management.

use rusqlite::{Connection, ErrorCode, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite` connection configured for the campground store.
///
/// Opening applies WAL journaling, `synchronous = NORMAL`, the configured
/// busy timeout and foreign-key enforcement, then initializes or verifies
/// the schema.
///
/// # Examples
///
/// ```no_run
/// use campground::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/campground.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] when the file is missing and
    /// auto-creation is off, or an error if the file cannot be opened, a
    /// PRAGMA fails, or the schema version is unsupported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), std::path::Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode reports the resulting mode as a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        super::migrations::check_schema_compatibility(&conn)?;
        log::debug!("opened database at {}", config.path.display());

        Ok(Self { conn, config })
    }

    /// Returns the configuration the database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the underlying connection for read-only queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Starts an `IMMEDIATE` transaction, taking the write lock up front.
    ///
    /// The transaction rolls back when dropped without a commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] when another writer holds the lock past
    /// the busy timeout, or a database error.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.config.busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref failure, _)
                    if matches!(
                        failure.code,
                        ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
                    ) =>
                {
                    Error::LockTimeout { seconds }
                }
                other => Error::Database(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_open_sets_pragmas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("test.db");
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_without_auto_create_fails_on_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("test.db");
        let err = Database::open(DatabaseConfig::new(&path).without_auto_create()).unwrap_err();
        assert!(matches!(err, Error::DataDirectoryNotFound { .. }));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        let result = db
            .connection()
            .execute("INSERT INTO facilities (name) VALUES ('x')", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_begin_immediate_times_out_while_locked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let config = DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50));

        let mut holder = Database::open(config.clone()).unwrap();
        let mut waiter = Database::open(config).unwrap();

        let _tx = holder.begin_immediate().unwrap();
        let err = waiter.begin_immediate().unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
        {
            let tx = db.begin_immediate().unwrap();
            tx.execute("INSERT INTO facilities (name) VALUES ('North')", [])
                .unwrap();
        }
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM facilities", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
