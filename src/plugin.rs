//! # Host Framework Plugin
//!
//! Wiring between a host test framework and the helpers registry.
//!
//! ## Overview
//!
//! The host framework drives [`SessionHooks`] at fixed points of a test run.
//! [`HelpersPlugin`] implements them on top of [`crate::session`]:
//!
//! | Hook               | Effect                                              |
//! |--------------------|-----------------------------------------------------|
//! | `on_configure`     | init logging, attach early for setup files          |
//! | `on_session_start` | attach (idempotent) and announce the plugin         |
//! | `on_test_setup`    | reset, only when `reset_between_tests` is set       |
//! | `on_session_end`   | detach                                              |
//!
//! ## Usage
//!
//! ```rust
//! use helpers_namespace::plugin::{HelpersPlugin, SessionHooks};
//! use helpers_namespace::{session, HelpersConfig};
//!
//! let plugin = HelpersPlugin::new(HelpersConfig::default());
//! let helpers = plugin.on_session_start();
//! assert!(helpers.is_empty());
//!
//! plugin.on_session_end();
//! assert!(session::helpers().is_none());
//! ```

use crate::config::HelpersConfig;
use crate::constants::PLUGIN_NAME;
use crate::logging::{init_structured_logging, log_registry_operation};
use crate::registry::Namespace;
use crate::session;

/// Lifecycle hooks a host test framework calls into.
///
/// Apart from `on_session_start`, which must hand the host the registry it
/// publishes, every hook defaults to doing nothing.
pub trait SessionHooks {
    /// Called once configuration is known, before any setup files run
    fn on_configure(&self) {}

    /// Called when the test session starts
    fn on_session_start(&self) -> Namespace;

    /// Called before each test body runs
    fn on_test_setup(&self) {}

    /// Called when the test session ends
    fn on_session_end(&self) {}
}

/// The helpers plugin, registered with the host as [`PLUGIN_NAME`]
#[derive(Debug, Clone, Default)]
pub struct HelpersPlugin {
    config: HelpersConfig,
}

impl HelpersPlugin {
    pub fn new(config: HelpersConfig) -> Self {
        Self { config }
    }

    /// Plugin configured from `HELPERS_NAMESPACE_*` environment variables
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(HelpersConfig::from_env()?))
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn config(&self) -> &HelpersConfig {
        &self.config
    }

    fn record(&self, operation: &str, status: &str) {
        if self.config.log_registrations {
            log_registry_operation(operation, None, status, Some(PLUGIN_NAME));
        }
    }
}

impl SessionHooks for HelpersPlugin {
    fn on_configure(&self) {
        init_structured_logging(&self.config);
        let attached = session::is_attached();
        session::attach();
        self.record("configure", if attached { "reused" } else { "attached" });
    }

    fn on_session_start(&self) -> Namespace {
        let helpers = session::attach();
        self.record("session_start", "registered");
        helpers
    }

    fn on_test_setup(&self) {
        if self.config.reset_between_tests && session::reset() {
            self.record("test_setup", "reset");
        }
    }

    fn on_session_end(&self) {
        let status = match session::detach() {
            Some(_) => "detached",
            None => "not_attached",
        };
        self.record("session_end", status);
    }
}
