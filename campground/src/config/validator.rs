//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest booking window the configuration may request, in months.
pub const MAX_HORIZON_MONTHS: u32 = 24;

/// Validates merged configuration values.
///
/// # Examples
///
/// ```
/// use campground::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { horizon_months: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a horizon outside `1..=24` months or
    /// a zero lock wait.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(months) = config.horizon_months {
            if months == 0 || months > MAX_HORIZON_MONTHS {
                return Err(Error::Validation {
                    field: "horizon_months".into(),
                    message: format!(
                        "must be between 1 and {MAX_HORIZON_MONTHS}, got {months}"
                    ),
                });
            }
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }
}
