//! Utility functions for CLI operations.
//!
//! Configuration loading, opening the service, argument parsing helpers and
//! output formatting shared by the commands.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use campground::database::{resolve_data_dir, DATABASE_FILE_NAME};
use campground::{
    CampgroundService, CampsiteAttribute, Config, ConfigBuilder, Database, DatabaseConfig,
    FixedClock, OutputFormat,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Date to treat as today.
    pub today: Option<NaiveDate>,

    /// Output format override.
    pub format: Option<OutputFormat>,
}

/// Resolve the data directory: `--data-dir`, then `CAMPGROUND_DATA_DIR`,
/// then `~/.campground`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `campground.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut overrides = Config::default();
    if let Some(seconds) = global.busy_timeout {
        overrides.maximum_lock_wait_seconds = Some(seconds);
    }
    if global.disable_autoinit {
        overrides.disable_autoinit = Some(true);
    }
    if let Some(format) = global.format {
        overrides.output_format = Some(format);
    }

    ConfigBuilder::new()
        .with_data_dir(data_dir(global)?)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database and wrap it in a service.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_service(global: &GlobalOptions, config: &Config) -> Result<CampgroundService, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);

    let mut db_config = DatabaseConfig::new(&db_path)
        .with_busy_timeout(Duration::from_secs(config.lock_wait_seconds()));
    if config.autoinit_disabled() {
        if !db_path.exists() {
            return Err(CliError::NoDataDirectory);
        }
        db_config = db_config.without_auto_create();
    }

    log::debug!("opening database at {}", db_path.display());
    let db = Database::open(db_config)?;
    let service = CampgroundService::from_config(db, config);
    Ok(match global.today {
        Some(today) => service.with_clock(FixedClock::new(today)),
        None => service,
    })
}

/// Parse a `NAME=VALUE` attribute argument.
pub fn parse_attribute(s: &str) -> Result<CampsiteAttribute, String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok(CampsiteAttribute::new(name.trim(), value)),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// Write a tab-separated table with an upper-cased header row.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = headers
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(handle, "{}", row.join("\t"))?;
    }
    Ok(())
}

/// Print an informational line to stderr unless `--quiet`.
pub fn note(global: &GlobalOptions, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Turn a `false` outcome into a semantic failure carrying `message`.
pub fn require(applied: bool, message: impl FnOnce() -> String) -> Result<(), CliError> {
    if applied {
        Ok(())
    } else {
        Err(CliError::SemanticFailure(message()))
    }
}
