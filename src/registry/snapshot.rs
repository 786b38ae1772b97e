//! # Registry Snapshots
//!
//! Serializable, point-in-time copies of a helpers tree, used for diagnostics
//! and for statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Copy of a node and everything below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeSnapshot {
    Namespace {
        path: String,
        children: BTreeMap<String, NodeSnapshot>,
    },
    Helper {
        path: String,
        signature: String,
    },
}

impl NodeSnapshot {
    pub fn path(&self) -> &str {
        match self {
            NodeSnapshot::Namespace { path, .. } | NodeSnapshot::Helper { path, .. } => path,
        }
    }

    /// Counts for the subtree below this node (the node itself excluded)
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();
        self.accumulate(0, &mut stats);
        stats
    }

    fn accumulate(&self, depth: usize, stats: &mut RegistryStats) {
        let NodeSnapshot::Namespace { children, .. } = self else {
            return;
        };
        for child in children.values() {
            stats.max_depth = stats.max_depth.max(depth + 1);
            match child {
                NodeSnapshot::Helper { .. } => stats.total_helpers += 1,
                NodeSnapshot::Namespace { children, .. } => {
                    stats.total_namespaces += 1;
                    if children.is_empty() {
                        stats.empty_namespaces += 1;
                    }
                }
            }
            child.accumulate(depth + 1, stats);
        }
    }

    /// Every helper path in the subtree, sorted
    pub fn helper_paths(&self) -> Vec<String> {
        match self {
            NodeSnapshot::Helper { path, .. } => vec![path.clone()],
            NodeSnapshot::Namespace { children, .. } => children
                .values()
                .flat_map(NodeSnapshot::helper_paths)
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Statistics about a helpers tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_helpers: usize,
    pub total_namespaces: usize,
    /// Namespaces with no children, usually left behind by lookups of
    /// helpers that were never registered
    pub empty_namespaces: usize,
    pub max_depth: usize,
}
