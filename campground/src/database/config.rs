//! Database configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "campground.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CAMPGROUND_DATA_DIR";

/// Parameters for opening a database.
///
/// # Examples
///
/// ```
/// use campground::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/campground.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait for a lock held by another connection.
    pub busy_timeout: Duration,
    /// Create the file and its parent directory when missing.
    pub auto_create: bool,
    /// Open without write access.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a configuration with a five second busy timeout and
    /// auto-creation enabled.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_secs(crate::config::DEFAULT_LOCK_WAIT_SECONDS),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Refuses to create a missing database.
    #[must_use]
    pub const fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Opens read-only. Implies no auto-creation.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// The default data directory, `~/.campground`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".campground"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// The data directory: `$CAMPGROUND_DATA_DIR` if set, else the default.
///
/// # Errors
///
/// Returns an error if the variable is unset and the home directory cannot
/// be determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// The database path inside the resolved data directory.
///
/// # Errors
///
/// See [`resolve_data_dir`].
///
/// # Examples
///
/// ```no_run
/// use campground::database::resolve_database_path;
///
/// println!("{}", resolve_database_path().unwrap().display());
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
