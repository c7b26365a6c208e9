//! Logging for the campground library and CLI.
//!
//! Library code emits records through the [`log`] facade (`log::debug!`,
//! `log::info!`, ...). This module provides the stderr backend that the CLI
//! installs, with three verbosity levels.

use std::env;
use std::fmt;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable consulted when no verbosity flag is given.
pub const LOG_MODE_ENV: &str = "CAMPGROUND_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use campground::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all log output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything down to debug records.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of `quiet`, `normal`, `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use campground::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr logger for the [`log`] facade.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger with the given level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger was already installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let filter = self.level.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn format(record: &Record<'_>) -> String {
        format!("{}: {}", record.level(), record.args())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Picks a logger from CLI flags and the environment.
///
/// Priority: `verbose`, then `quiet`, then [`LOG_MODE_ENV`], then Normal.
/// An unrecognized environment value falls back to Normal.
///
/// # Examples
///
/// ```
/// use campground::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}
