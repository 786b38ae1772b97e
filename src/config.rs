//! # Configuration
//!
//! Settings for the helpers plugin, layered from defaults, an optional file and
//! `HELPERS_NAMESPACE_*` environment variables (later layers win).
//!
//! ```rust,no_run
//! use helpers_namespace::HelpersConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), helpers_namespace::HelpersError> {
//! // Defaults plus environment overrides
//! let config = HelpersConfig::from_env()?;
//!
//! // Or with a project file in between
//! let config = HelpersConfig::load(Some(Path::new("helpers.yaml")))?;
//! # Ok(())
//! # }
//! ```

use crate::constants::ENV_PREFIX;
use crate::error::{HelpersError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpersConfig {
    /// Clear the registry before every test instead of sharing it across the
    /// whole session
    pub reset_between_tests: bool,
    /// `tracing` filter directive used by [`crate::logging::init_structured_logging`]
    pub log_filter: String,
    /// Emit a structured event for every lifecycle operation
    pub log_registrations: bool,
}

impl Default for HelpersConfig {
    fn default() -> Self {
        Self {
            reset_between_tests: false,
            log_filter: "info".to_string(),
            log_registrations: true,
        }
    }
}

impl HelpersConfig {
    /// Defaults overridden by `HELPERS_NAMESPACE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Defaults, then `file` (format picked from its extension), then the
    /// environment. A file that is given must exist.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("reset_between_tests", defaults.reset_between_tests)?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("log_registrations", defaults.log_registrations)?;

        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(HelpersError::ConfigurationError(
                "log_filter must not be empty".to_string(),
            ));
        }
        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            HelpersError::ConfigurationError(format!("Invalid log_filter '{}': {e}", self.log_filter))
        })?;
        Ok(())
    }
}
