//! Trellis Core Library
//!
//! This crate provides the foundational types for the trellis dataflow
//! engine: the tagged value model, node-type signatures and the compute
//! contract, the registry mechanism, the validating graph builder, and the
//! plan replay helpers.
//!
//! # Overview
//!
//! Trellis executes declaratively described computation graphs: typed nodes
//! wired by typed ports, validated at construction, scheduled by data
//! precedence, and gated by derived control edges.
//!
//! # Key Components
//!
//! - **Value**: the tagged union flowing through edges
//! - **NodeType / Signature**: the immutable type catalog entries
//! - **NodeRegistry**: name → type resolution, fixed at build time
//! - **Graph**: incremental, validating construction plus output reads
//! - **PlanDocument**: external plan formats replayed onto the builder
//!
//! Scheduling and execution live in `trellis-executor`; the built-in node
//! catalog lives in `trellis-nodes`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod graph;
pub mod node;
pub mod plan;
pub mod registry;
pub mod types;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience
pub use error::{Result, TrellisError};
pub use graph::{ControlEdge, Edge, ExecutionState, Graph, NodeState, OutputPin};
pub use node::{ComputeContext, ComputeResult, NodeType, ParamSpec, Params, Signature};
pub use plan::PlanDocument;
pub use registry::NodeRegistry;
pub use types::NodeId;
pub use value::{Value, ValueType};
