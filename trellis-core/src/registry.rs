//! The node-type registry.
//!
//! An immutable catalog mapping type names to node-type handles. The catalog
//! is populated once (see `trellis-nodes` for the standard seeding) and then
//! only read; lookups hand out shared handles that graphs keep for the life
//! of their nodes.

use crate::node::{NodeType, Signature};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable catalog of node types.
pub struct NodeRegistry {
    nodes: HashMap<String, Arc<dyn NodeType>>,
}

impl NodeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Register a node type under its signature name.
    pub fn register<T: NodeType + 'static>(&mut self, node: T) {
        let name = node.signature().name;
        self.nodes.insert(name, Arc::new(node));
    }

    /// Register `alias` as a second name for an existing type.
    pub fn alias(&mut self, alias: impl Into<String>, target: &str) {
        debug_assert!(self.nodes.contains_key(target));
        if let Some(node) = self.nodes.get(target).cloned() {
            self.nodes.insert(alias.into(), node);
        }
    }

    /// Look up a node type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn NodeType>> {
        self.nodes.get(name).cloned()
    }

    /// Check whether a type name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// The signature of a registered type.
    #[must_use]
    pub fn describe(&self, name: &str) -> Option<Signature> {
        self.nodes.get(name).map(|n| n.signature())
    }

    /// All registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered names (aliases included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
