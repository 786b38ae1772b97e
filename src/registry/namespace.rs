//! # Helper Namespaces
//!
//! The interior nodes of the helpers tree.
//!
//! ## Overview
//!
//! A namespace maps names to children, each either another namespace or a
//! registered [`Helper`]. Reads and writes follow different rules:
//!
//! - **Reads auto-vivify**: [`Namespace::get`] on an unbound name creates,
//!   binds and returns an empty namespace. Reading the same name again returns
//!   that same namespace.
//! - **Writes fail fast**: [`Namespace::register`] refuses any name that is
//!   already bound, whether to a helper or to a namespace. Nothing is ever
//!   silently overwritten.
//! - **Namespaces are not callable**: calling one fails with
//!   [`HelpersError::UnregisteredHelper`]. This is how a typo or a forgotten
//!   registration surfaces: every segment of the path vivified an empty
//!   namespace and the last one was called.
//!
//! A small set of reserved names (see [`crate::constants::RESERVED_NAMES`])
//! is rejected before the child map is touched, so the node's own operations
//! can never be shadowed.
//!
//! ## Usage
//!
//! ```rust
//! use helpers_namespace::{register, Namespace};
//!
//! fn foo(bar: bool) -> bool {
//!     bar
//! }
//!
//! # fn main() -> Result<(), helpers_namespace::HelpersError> {
//! let helpers = Namespace::root();
//!
//! // Register under a nested namespace
//! register!(helpers.lookup("foo.bar")?, foo)?;
//!
//! let value: bool = helpers.lookup("foo.bar.foo")?.call((true,))?;
//! assert!(value);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Each node guards its child map with a lock so a shared registry is memory
//! safe, but sequences of operations are not atomic. Registering and resolving
//! from several threads at once is unsupported; callers must serialise access.

use super::helper::{declared_name, Helper, HelperFn};
use super::node::Node;
use super::path::{validate_name, HelperPath};
use super::snapshot::{NodeSnapshot, RegistryStats};
use crate::error::{HelpersError, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct NamespaceInner {
    path: HelperPath,
    children: RwLock<BTreeMap<String, Node>>,
}

/// A level of the helpers tree.
///
/// Cloning a `Namespace` is cheap and yields another handle to the same node.
#[derive(Clone)]
pub struct Namespace {
    inner: Arc<NamespaceInner>,
}

impl Namespace {
    /// Create a new, empty root namespace
    pub fn root() -> Self {
        Self::at(HelperPath::root())
    }

    fn at(path: HelperPath) -> Self {
        Self {
            inner: Arc::new(NamespaceInner {
                path,
                children: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    /// Path of this namespace relative to the root
    pub fn path(&self) -> &HelperPath {
        &self.inner.path
    }

    /// Return the child bound under `name`, creating an empty namespace there
    /// if nothing is bound yet.
    ///
    /// Fails only for reserved or malformed names.
    pub fn get(&self, name: &str) -> Result<Node> {
        validate_name(name)?;

        let mut children = self.inner.children.write();
        let node = children.entry(name.to_string()).or_insert_with(|| {
            let child = Namespace::at(self.inner.path.child(name));
            debug!(path = %child.path(), "Auto-vivified helpers namespace");
            Node::Namespace(child)
        });
        Ok(node.clone())
    }

    /// Walk `segments` from this namespace with [`Namespace::get`] semantics
    /// at every level
    pub fn resolve<I, S>(&self, segments: I) -> Result<Node>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .try_fold(Node::Namespace(self.clone()), |node, segment| {
                node.get(segment.as_ref())
            })
    }

    /// Resolve a dotted path such as `"fixtures.users.make_admin"`
    pub fn lookup(&self, path: &str) -> Result<Node> {
        let path: HelperPath = path.parse()?;
        self.resolve(&path)
    }

    /// Register `func` under a name derived from its type and hand it back
    /// unchanged.
    ///
    /// The name is the last segment of [`std::any::type_name`], which is a
    /// diagnostic string with no stable format. Treat this as a best-effort
    /// shorthand; [`crate::register!`] takes the name from the source path and
    /// is the reliable way to register under a function's own name. Closures
    /// have no usable name and fail with [`HelpersError::AnonymousHelper`].
    pub fn register<F, Args, R>(&self, func: F) -> Result<F>
    where
        F: HelperFn<Args, R> + Clone,
        Args: 'static,
        R: 'static,
    {
        let name = declared_name::<F>()?;
        self.register_as(&name, func)
    }

    /// Register `func` under `name` and hand it back unchanged
    pub fn register_as<F, Args, R>(&self, name: &str, func: F) -> Result<F>
    where
        F: HelperFn<Args, R> + Clone,
        Args: 'static,
        R: 'static,
    {
        validate_name(name)?;

        let mut children = self.inner.children.write();
        if children.contains_key(name) {
            warn!(
                namespace = %self.inner.path,
                name = name,
                "Rejected duplicate helper registration"
            );
            return Err(HelpersError::DuplicateName {
                name: name.to_string(),
                namespace: self.inner.path.to_string(),
            });
        }

        let helper = Helper::new(self.inner.path.child(name), func.clone());
        info!(
            path = %helper.path(),
            signature = helper.signature(),
            "Registered helper function"
        );
        children.insert(name.to_string(), Node::Helper(helper));
        Ok(func)
    }

    /// Start a registration under a custom name; the function is supplied
    /// later through [`PendingRegistration::register`]
    pub fn named(&self, name: impl Into<String>) -> PendingRegistration {
        PendingRegistration {
            namespace: self.clone(),
            name: name.into(),
        }
    }

    /// Register `func` at a dotted path below this namespace. Intermediate
    /// namespaces are created as needed.
    pub fn register_at<F, Args, R>(&self, path: &str, func: F) -> Result<F>
    where
        F: HelperFn<Args, R> + Clone,
        Args: 'static,
        R: 'static,
    {
        let path: HelperPath = path.parse()?;
        let (Some(name), Some(parent)) = (path.name(), path.parent()) else {
            return Err(HelpersError::InvalidName {
                name: String::new(),
                reason: "registration path is empty".to_string(),
            });
        };
        self.resolve(&parent)?.register_as(name, func)
    }

    /// Namespaces are never callable; this always fails with
    /// [`HelpersError::UnregisteredHelper`]
    pub fn call<Args, R>(&self, _args: Args) -> Result<R> {
        Err(HelpersError::UnregisteredHelper {
            path: self.inner.path.to_string(),
        })
    }

    /// Whether `name` is bound here. Never creates a binding.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.children.read().contains_key(name)
    }

    /// Bound names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.inner.children.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.children.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.children.read().is_empty()
    }

    /// Remove every binding at every depth below this namespace.
    ///
    /// The node itself survives, so handles to it stay valid; handles to
    /// former descendant namespaces stay valid too but are emptied.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.inner.children.write());
        let removed = drained.len();
        for node in drained.into_values() {
            if let Node::Namespace(child) = node {
                child.clear();
            }
        }
        debug!(path = %self.inner.path, removed = removed, "Cleared helpers namespace");
    }

    /// Recursive debug rendering of this namespace and its children
    pub fn describe(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_description(&mut out);
        out
    }

    fn write_description(&self, out: &mut String) -> fmt::Result {
        out.write_str("Namespace {")?;
        for (index, (name, node)) in self.children().into_iter().enumerate() {
            if index > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{name:?}: ")?;
            match node {
                Node::Namespace(child) => child.write_description(out)?,
                Node::Helper(helper) => write!(out, "Helper({})", helper.signature())?,
            }
        }
        out.write_str("}")
    }

    /// Serializable copy of this subtree
    pub fn snapshot(&self) -> NodeSnapshot {
        let children = self
            .children()
            .into_iter()
            .map(|(name, node)| (name, node.snapshot()))
            .collect();
        NodeSnapshot::Namespace {
            path: self.inner.path.to_string(),
            children,
        }
    }

    /// Counts of helpers and namespaces below this node
    pub fn stats(&self) -> RegistryStats {
        self.snapshot().stats()
    }

    /// True when both handles refer to the same node
    pub fn ptr_eq(this: &Namespace, other: &Namespace) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Copy of the child map, taken so no lock is held while descending
    fn children(&self) -> Vec<(String, Node)> {
        self.inner
            .children
            .read()
            .iter()
            .map(|(name, node)| (name.clone(), node.clone()))
            .collect()
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Register a function item under the name it is written with.
///
/// `register!(namespace, path::to::make_user)` expands to
/// `namespace.register_as("make_user", path::to::make_user)`, so the bound name
/// is the last segment of the path as written. Works on a [`Namespace`] or a
/// [`Node`].
///
/// ```rust
/// use helpers_namespace::{register, Namespace};
///
/// mod fixtures {
///     pub fn make_user(name: &'static str) -> String {
///         name.to_uppercase()
///     }
/// }
///
/// # fn main() -> Result<(), helpers_namespace::HelpersError> {
/// let helpers = Namespace::root();
/// register!(helpers, fixtures::make_user)?;
///
/// let user: String = helpers.get("make_user")?.call(("ada",))?;
/// assert_eq!(user, "ADA");
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! register {
    ($namespace:expr, $($segment:ident)::+) => {
        $namespace.register_as($crate::__last_segment!($($segment),+), $($segment)::+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __last_segment {
    ($last:ident) => {
        stringify!($last)
    };
    ($head:ident, $($rest:ident),+) => {
        $crate::__last_segment!($($rest),+)
    };
}

/// A registration waiting for its function, created by [`Namespace::named`]
#[must_use = "nothing is registered until `register` is called"]
#[derive(Debug)]
pub struct PendingRegistration {
    namespace: Namespace,
    name: String,
}

impl PendingRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Complete the registration and hand `func` back unchanged
    pub fn register<F, Args, R>(self, func: F) -> Result<F>
    where
        F: HelperFn<Args, R> + Clone,
        Args: 'static,
        R: 'static,
    {
        self.namespace.register_as(&self.name, func)
    }
}
