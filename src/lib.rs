#![allow(clippy::must_use_candidate)] // Allow accessors without must_use when context is clear
#![allow(clippy::missing_errors_doc)] // Error variants are documented on HelpersError

//! # Helpers Namespace
//!
//! A hierarchical namespace of helper functions for test suites.
//!
//! ## Overview
//!
//! Test setup code registers plain functions, optionally under nested
//! namespace paths, and test bodies resolve and call them through the same
//! path. Misuse is reported immediately: registering a name twice, calling a
//! helper that was never registered, or trying to register through a helper
//! instead of a namespace all fail with a [`HelpersError`] naming the
//! offending path.
//!
//! ## Module Organization
//!
//! - [`registry`] - The helpers tree: namespaces, helpers, paths, snapshots
//! - [`session`] - Process-wide slot the root namespace is published under
//! - [`plugin`] - Lifecycle hooks for the host test framework
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//! - [`test_utils`] - Serialised access to the session slot for test suites
//!
//! [`register!`] binds a function under the name it is written with. Closures
//! and renamed helpers go through [`Namespace::register_as`] or
//! [`Namespace::named`].
//!
//! ## Quick Start
//!
//! ```rust
//! use helpers_namespace::{register, session, HelpersError};
//!
//! fn foo(bar: bool) -> bool {
//!     bar
//! }
//!
//! # fn main() -> Result<(), HelpersError> {
//! let helpers = session::attach();
//!
//! // Register at the root and under a nested namespace
//! register!(helpers, foo)?;
//! register!(helpers.lookup("foo_ns.bar")?, foo)?;
//!
//! let value: bool = helpers.get("foo")?.call((true,))?;
//! assert!(value);
//! let value: bool = helpers.lookup("foo_ns.bar.foo")?.call((true,))?;
//! assert!(value);
//!
//! // A second `foo` at the root is rejected
//! assert!(matches!(
//!     register!(helpers, foo),
//!     Err(HelpersError::DuplicateName { .. })
//! ));
//!
//! // Calling something that was never registered
//! assert!(matches!(
//!     helpers.lookup("nope")?.call::<_, ()>(()),
//!     Err(HelpersError::UnregisteredHelper { .. })
//! ));
//! # session::detach();
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Test sessions are expected to run registration and lookups sequentially.
//! The registry is memory safe when shared, but concurrent registration into
//! the same namespace from several threads is unsupported.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod registry;
pub mod session;
pub mod test_utils;

pub use config::HelpersConfig;
pub use constants::{PLUGIN_NAME, RESERVED_NAMES, ROOT_NAME};
pub use error::{HelpersError, Result};
pub use plugin::{HelpersPlugin, SessionHooks};
pub use registry::{
    Helper, HelperFn, HelperMetadata, HelperPath, Namespace, Node, NodeSnapshot,
    PendingRegistration, RegistryStats,
};
