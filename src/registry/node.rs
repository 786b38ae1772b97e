//! # Tree Nodes
//!
//! [`Node`] is what a lookup hands back: either a namespace or a helper.
//! It exposes the same operations as a namespace so paths can be chained
//! without matching on every step; operations that make no sense for a helper
//! fail with a descriptive error instead.

use super::helper::{Helper, HelperFn};
use super::namespace::{Namespace, PendingRegistration};
use super::path::HelperPath;
use super::snapshot::NodeSnapshot;
use crate::error::{HelpersError, Result};
use tracing::warn;

#[derive(Debug, Clone)]
pub enum Node {
    Namespace(Namespace),
    Helper(Helper),
}

impl Node {
    pub fn path(&self) -> &HelperPath {
        match self {
            Node::Namespace(namespace) => namespace.path(),
            Node::Helper(helper) => helper.path(),
        }
    }

    /// Child lookup with auto-vivification; fails on helpers with
    /// [`HelpersError::NotANamespace`]
    pub fn get(&self, name: &str) -> Result<Node> {
        match self {
            Node::Namespace(namespace) => namespace.get(name),
            Node::Helper(helper) => Err(HelpersError::NotANamespace {
                helper: helper.path().to_string(),
                attribute: name.to_string(),
            }),
        }
    }

    pub fn resolve<I, S>(&self, segments: I) -> Result<Node>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .try_fold(self.clone(), |node, segment| node.get(segment.as_ref()))
    }

    pub fn register<F, Args, R>(&self, func: F) -> Result<F>
    where
        F: HelperFn<Args, R> + Clone,
        Args: 'static,
        R: 'static,
    {
        self.as_registrar()?.register(func)
    }

    pub fn register_as<F, Args, R>(&self, name: &str, func: F) -> Result<F>
    where
        F: HelperFn<Args, R> + Clone,
        Args: 'static,
        R: 'static,
    {
        self.as_registrar()?.register_as(name, func)
    }

    pub fn named(&self, name: impl Into<String>) -> Result<PendingRegistration> {
        Ok(self.as_registrar()?.named(name))
    }

    /// Call the helper at this node. Namespaces fail with
    /// [`HelpersError::UnregisteredHelper`].
    #[inline]
    pub fn call<Args, R>(&self, args: Args) -> Result<R>
    where
        Args: 'static,
        R: 'static,
    {
        match self {
            Node::Namespace(namespace) => namespace.call(args),
            Node::Helper(helper) => helper.call(args),
        }
    }

    /// Whether `name` is bound below this node; always false for helpers
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Node::Namespace(namespace) => namespace.contains(name),
            Node::Helper(_) => false,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Node::Namespace(namespace) => namespace.describe(),
            Node::Helper(helper) => format!("Helper({})", helper.signature()),
        }
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        match self {
            Node::Namespace(namespace) => namespace.snapshot(),
            Node::Helper(helper) => NodeSnapshot::Helper {
                path: helper.path().to_string(),
                signature: helper.signature().to_string(),
            },
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Node::Namespace(namespace) => Some(namespace),
            Node::Helper(_) => None,
        }
    }

    pub fn as_helper(&self) -> Option<&Helper> {
        match self {
            Node::Helper(helper) => Some(helper),
            Node::Namespace(_) => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Node::Namespace(_))
    }

    pub fn is_helper(&self) -> bool {
        matches!(self, Node::Helper(_))
    }

    fn as_registrar(&self) -> Result<&Namespace> {
        match self {
            Node::Namespace(namespace) => Ok(namespace),
            Node::Helper(helper) => {
                warn!(helper = %helper.path(), "Attempted to register through a helper function");
                Err(HelpersError::LeafRegistration {
                    helper: helper.path().to_string(),
                })
            }
        }
    }
}

impl From<Namespace> for Node {
    fn from(namespace: Namespace) -> Self {
        Node::Namespace(namespace)
    }
}

impl From<Helper> for Node {
    fn from(helper: Helper) -> Self {
        Node::Helper(helper)
    }
}
