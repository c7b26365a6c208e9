//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::availability::DEFAULT_HORIZON_MONTHS;

/// Default number of seconds to wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial sources (a YAML file, the
/// environment, programmatic overrides) can be layered. Use the accessor
/// methods to read a value with its default applied.
///
/// # Examples
///
/// ```
/// use campground::config::Config;
///
/// let config = Config {
///     horizon_months: Some(3),
///     ..Default::default()
/// };
/// assert_eq!(config.horizon_months(), 3);
/// assert_eq!(Config::default().horizon_months(), 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Length of the booking window in calendar months.
    pub horizon_months: Option<u32>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Refuse to create a missing data directory or database.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Booking window length, defaulting to two months.
    #[must_use]
    pub fn horizon_months(&self) -> u32 {
        self.horizon_months.unwrap_or(DEFAULT_HORIZON_MONTHS)
    }

    /// Lock wait in seconds, defaulting to five.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Whether automatic initialization is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Output format, defaulting to a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use campground::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Table,
    /// JSON documents.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid output format: {s} (expected table or json)")),
        }
    }
}
