//! # Helpers Registry
//!
//! A tree of test helper functions grouped under nested namespaces.
//!
//! ## Overview
//!
//! Test suites register plain functions during setup, optionally below a
//! namespace path, and test bodies later resolve and call them through the
//! same path. The tree is self-similar: every interior node is a
//! [`Namespace`], every leaf a [`Helper`].
//!
//! ## Architecture
//!
//! ```text
//! Namespace (root, "helpers")
//! ├── foo            Helper      helpers.foo
//! └── db             Namespace   helpers.db
//!     └── make_user  Helper      helpers.db.make_user
//! ```
//!
//! - **HelperPath**: validated dotted path addressing a node
//! - **Namespace**: auto-vivifying on read, fail-fast on write
//! - **Helper**: type-erased function with a checked call signature
//! - **Node**: either of the above, as returned by lookups
//! - **NodeSnapshot / RegistryStats**: diagnostics
//!
//! ## Usage
//!
//! ```rust
//! use helpers_namespace::registry::Namespace;
//!
//! fn make_user(name: String) -> String {
//!     format!("user:{name}")
//! }
//!
//! # fn main() -> Result<(), helpers_namespace::HelpersError> {
//! let helpers = Namespace::root();
//! helpers.lookup("db")?.register(make_user)?;
//!
//! let user: String = helpers.lookup("db.make_user")?.call(("ada".to_string(),))?;
//! assert_eq!(user, "user:ada");
//! # Ok(())
//! # }
//! ```

pub mod helper;
pub mod namespace;
pub mod node;
pub mod path;
pub mod snapshot;

// Re-export main types for easy access
pub use helper::{Helper, HelperFn, HelperMetadata};
pub use namespace::{Namespace, PendingRegistration};
pub use node::Node;
pub use path::{validate_name, HelperPath};
pub use snapshot::{NodeSnapshot, RegistryStats};
