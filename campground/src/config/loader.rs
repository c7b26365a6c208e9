//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::Result;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "campground.yaml";

/// A configuration file and its parsed contents.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use campground::config::ConfigLoader;
/// use std::path::Path;
///
/// if let Some(source) = ConfigLoader::load_from_data_dir(Path::new("/var/lib/campground")).unwrap() {
///     println!("loaded {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `campground.yaml` from `data_dir`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_data_dir(data_dir: &Path) -> Result<Option<ConfigSource>> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(Some(ConfigSource { path, config }))
    }

    /// Loads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Path of the configuration file for the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::database::default_data_dir()?.join(CONFIG_FILE_NAME))
    }
}

impl From<ConfigSource> for Config {
    fn from(source: ConfigSource) -> Self {
        source.config
    }
}
