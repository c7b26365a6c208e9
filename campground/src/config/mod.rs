//! Configuration for the campground library.
//!
//! Configuration is merged from several sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`CAMPGROUND_*`)
//! 3. `campground.yaml` in the data directory
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use campground::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("booking window: {} months", config.horizon_months());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::{ConfigValidator, MAX_HORIZON_MONTHS};
