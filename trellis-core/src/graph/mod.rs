//! Graph model and builder.
//!
//! A graph is built incrementally through validating operations, then handed
//! to the executor for a run. Construction state (nodes, edges, pins) is
//! caller-driven; run state (execution states, derived control edges,
//! output values) is transient and reset at the start of every run.

mod edge;
mod node;
#[allow(clippy::module_inception)]
mod graph;

pub use edge::{ControlEdge, Edge, OutputPin};
pub use graph::Graph;
pub use node::{ExecutionState, NodeState};
