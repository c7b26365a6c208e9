//! Environment variable handling for configuration overrides.
//!
//! Recognized variables:
//!
//! - `CAMPGROUND_HORIZON_MONTHS`
//! - `CAMPGROUND_MAXIMUM_LOCK_WAIT_SECONDS`
//! - `CAMPGROUND_DISABLE_AUTOINIT`
//! - `CAMPGROUND_OUTPUT_FORMAT`

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use campground::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies `CAMPGROUND_*` variables on top of `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable when a value does not
    /// parse.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(months) = Self::parse_var::<u32>("CAMPGROUND_HORIZON_MONTHS")? {
            config.horizon_months = Some(months);
        }

        if let Some(seconds) = Self::parse_var::<u64>("CAMPGROUND_MAXIMUM_LOCK_WAIT_SECONDS")? {
            config.maximum_lock_wait_seconds = Some(seconds);
        }

        if let Ok(val) = env::var("CAMPGROUND_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("CAMPGROUND_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("CAMPGROUND_OUTPUT_FORMAT") {
            let format = OutputFormat::from_str(&val).map_err(|message| Error::Validation {
                field: "CAMPGROUND_OUTPUT_FORMAT".into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        Ok(())
    }

    fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(raw) => raw.trim().parse().map(Some).map_err(|_| Error::Validation {
                field: name.into(),
                message: format!("must be a non-negative integer, got '{raw}'"),
            }),
            Err(_) => Ok(None),
        }
    }

    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "CAMPGROUND_HORIZON_MONTHS",
        "CAMPGROUND_MAXIMUM_LOCK_WAIT_SECONDS",
        "CAMPGROUND_DISABLE_AUTOINIT",
        "CAMPGROUND_OUTPUT_FORMAT",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_vars_leaves_config_untouched() {
        clear_vars();
        let mut config = Config {
            horizon_months: Some(3),
            ..Default::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config.horizon_months, Some(3));
        assert_eq!(config.output_format, None);
    }

    #[test]
    #[serial]
    fn test_all_vars_applied() {
        clear_vars();
        env::set_var("CAMPGROUND_HORIZON_MONTHS", "6");
        env::set_var("CAMPGROUND_MAXIMUM_LOCK_WAIT_SECONDS", "12");
        env::set_var("CAMPGROUND_DISABLE_AUTOINIT", "yes");
        env::set_var("CAMPGROUND_OUTPUT_FORMAT", "json");

        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        clear_vars();

        assert_eq!(config.horizon_months, Some(6));
        assert_eq!(config.maximum_lock_wait_seconds, Some(12));
        assert_eq!(config.disable_autoinit, Some(true));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    #[serial]
    fn test_invalid_number_names_variable() {
        clear_vars();
        env::set_var("CAMPGROUND_HORIZON_MONTHS", "two");
        let err = EnvironmentConfig::apply_overrides(&mut Config::default()).unwrap_err();
        clear_vars();
        assert!(
            matches!(err, Error::Validation { ref field, .. } if field == "CAMPGROUND_HORIZON_MONTHS")
        );
    }

    #[test]
    #[serial]
    fn test_invalid_bool_rejected() {
        clear_vars();
        env::set_var("CAMPGROUND_DISABLE_AUTOINIT", "maybe");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_vars();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bool_variants() {
        for truthy in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("X", truthy).unwrap());
        }
        for falsy in ["false", "0", "no", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("X", falsy).unwrap());
        }
    }
}
