//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FORM_WIZARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use form_wizard::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod error;
mod logging;
mod wizard;

pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LoggingConfig};
pub use wizard::WizardOptions;

use serde::Deserialize;
use std::path::Path;

/// Root application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Wizard behaviour (read-only, flattened, buttons, breadcrumbs)
    #[serde(default)]
    pub wizard: WizardOptions,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FORM_WIZARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `FORM_WIZARD__WIZARD__READ_ONLY=true` -> `wizard.read_only = true`
    /// - `FORM_WIZARD__LOGGING__FILTER=debug` -> `logging.filter = "debug"`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a TOML, JSON or YAML file, with environment
    /// variables layered on top.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix("FORM_WIZARD")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.wizard.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
