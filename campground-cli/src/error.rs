//! CLI-specific error types with exit codes.

use std::fmt;

use campground::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),

    /// Semantic failure: the operation ran but did not apply.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (missing resource, conflict, rejected input,
    ///   or an operation that reported false)
    /// - 2: Timeout waiting for database lock
    /// - 3: No data directory found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SemanticFailure(_) => 1,
            Self::Library(lib_err) => match lib_err {
                LibError::NotFound { .. }
                | LibError::Conflict { .. }
                | LibError::InvalidReservation { .. }
                | LibError::InvalidAttribute { .. }
                | LibError::InvalidEquipment { .. } => 1,
                _ => 6,
            },
            Self::Timeout => 2,
            Self::NoDataDirectory => 3,
            Self::InvalidArguments(_) => 4,
            Self::Io(_) => 5,
            Self::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(e) => write!(f, "{e}"),
            Self::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Timeout => write!(f, "Timeout waiting for database lock"),
            Self::NoDataDirectory => write!(
                f,
                "Data directory not found (use --data-dir or drop --disable-autoinit)"
            ),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Library(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } => Self::Timeout,
            LibError::DataDirectoryNotFound { .. } => Self::NoDataDirectory,
            LibError::Validation { field, message } => {
                Self::InvalidArguments(format!("{field}: {message}"))
            }
            LibError::Configuration(e) => Self::Config(e.to_string()),
            LibError::Io(e) => Self::Io(e),
            other => Self::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Io(e.into())
    }
}
