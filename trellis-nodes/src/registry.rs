//! The standard node-type catalog.
//!
//! `create_standard_registry` seeds every built-in; `standard_registry` is
//! the process-wide instance, lazily initialized on first access and
//! immutable afterwards — lookups are contention-free reads.

use crate::constant::{BoolNode, NumberNode, StringNode};
use crate::flow::{IfNode, MergeNode};
use crate::math::{AddNode, ClampNode, MultiplyNode};
use crate::output::{OutputNumberNode, OutputStringNode};
use crate::text::{ConcatNode, ToStringNode};
use std::sync::{Arc, OnceLock};
use trellis_core::registry::NodeRegistry;

/// Create a registry populated with all built-in node types.
#[must_use]
pub fn create_standard_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // Constant sources
    registry.register(NumberNode);
    registry.register(StringNode);
    registry.register(BoolNode);

    // Arithmetic
    registry.register(AddNode);
    registry.register(MultiplyNode);
    registry.register(ClampNode);

    // Strings
    registry.register(ToStringNode);
    registry.register(ConcatNode);

    // Observable outputs
    registry.register(OutputNumberNode);
    registry.register(OutputStringNode);

    // Flow control
    registry.register(IfNode);
    registry.register(MergeNode);

    // Legacy name kept for callers that predate the typed node families.
    registry.alias("Add", "AddNumber");

    registry
}

static STANDARD_REGISTRY: OnceLock<Arc<NodeRegistry>> = OnceLock::new();

/// The process-wide standard registry.
#[must_use]
pub fn standard_registry() -> Arc<NodeRegistry> {
    STANDARD_REGISTRY
        .get_or_init(|| Arc::new(create_standard_registry()))
        .clone()
}
