//! Configuration merging and precedence handling.

use crate::config::schema::Config;

/// Merges configuration layers; later layers win field by field.
///
/// # Examples
///
/// ```
/// use campground::config::{Config, ConfigMerger};
///
/// let low = Config { horizon_months: Some(2), maximum_lock_wait_seconds: Some(9), ..Default::default() };
/// let high = Config { horizon_months: Some(4), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.horizon_months, Some(4));
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges layers given from lowest to highest precedence.
    #[must_use]
    pub fn merge<I>(layers: I) -> Config
    where
        I: IntoIterator<Item = Config>,
    {
        let mut result = Config::default();
        for layer in layers {
            Self::merge_into(&mut result, &layer);
        }
        result
    }

    /// Copies every `Some` field of `source` over `target`.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.horizon_months.is_some() {
            target.horizon_months = source.horizon_months;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
