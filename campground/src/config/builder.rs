//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from defaults, the data-directory file, the
/// environment and programmatic overrides, in that order of precedence
/// (lowest first).
///
/// # Examples
///
/// ```
/// use campground::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { horizon_months: Some(3), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.horizon_months(), 3);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads the default data directory and environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `campground.yaml` from `dir` instead of the default data directory.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Ignores configuration files.
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `CAMPGROUND_*` environment variables.
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` with the highest precedence.
    pub fn with_config(mut self, config: Config) -> Self {
        match self.overrides.as_mut() {
            Some(existing) => ConfigMerger::merge_into(existing, &config),
            None => self.overrides = Some(config),
        }
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed, an environment variable
    /// is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            let data_dir = match self.data_dir {
                Some(dir) => dir,
                None => crate::database::default_data_dir()?,
            };
            if let Some(source) = ConfigLoader::load_from_data_dir(&data_dir)? {
                ConfigMerger::merge_into(&mut config, &source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, &overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
