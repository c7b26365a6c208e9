//! Error types for the campground library.
//!
//! Every fallible operation in the crate returns [`Result`]. Domain failures
//! (missing campsites, overlapping stays, bad date ranges) have their own
//! variants so callers can map them onto user-facing responses without
//! inspecting message text.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a campground error.
///
/// # Examples
///
/// ```
/// use campground::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the campground library.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced facility, campsite or reservation does not exist
    /// (or is inactive where an active one is required).
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The request collides with existing state.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// A reservation date range failed the check-in/check-out/horizon rules.
    #[error("invalid reservation: {reason}")]
    InvalidReservation {
        /// Why the reservation was rejected.
        reason: String,
    },

    /// An attribute supplied for a campsite is unknown or has a blank value.
    #[error("invalid attribute '{name}': {reason}")]
    InvalidAttribute {
        /// The attribute name as supplied.
        name: String,
        /// Why the attribute was rejected.
        reason: String,
    },

    /// An equipment name supplied for a campsite is unknown.
    #[error("invalid equipment '{name}': {reason}")]
    InvalidEquipment {
        /// The equipment name as supplied.
        name: String,
        /// Why the equipment was rejected.
        reason: String,
    },

    /// A statement that had to change rows inside a transactional sequence
    /// changed none (or fewer than required).
    #[error("data consistency error: {details}")]
    DataConsistency {
        /// What was expected and what happened.
        details: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The write lock could not be acquired before the busy timeout elapsed.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Builds a [`Error::NotFound`] for a campsite id.
    pub(crate) fn campsite_not_found(id: crate::CampsiteId) -> Self {
        Self::NotFound {
            resource: format!("campsite {id}"),
        }
    }

    /// Check if error is a missing-resource error.
    ///
    /// # Examples
    ///
    /// ```
    /// use campground::Error;
    ///
    /// let err = Error::NotFound { resource: "campsite 7".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a conflict with existing state.
    ///
    /// # Examples
    ///
    /// ```
    /// use campground::Error;
    ///
    /// let err = Error::Conflict { details: "duplicate campsite".to_string() };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
