//! Node instances.

use crate::node::{CONDITIONAL_TYPE_NAME, NodeType, Params, Signature};
use crate::types::NodeId;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of a node within a single run.
///
/// Every node is reset to `Pending` when a run starts. `Skipped` gates
/// downstream reads: a node pulling from a skipped source becomes skipped
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionState {
    /// Not yet executed.
    #[default]
    Pending,
    /// Launched on the active branch.
    Active,
    /// On an inactive branch; produced no outputs.
    Skipped,
    /// Compute finished and outputs are populated.
    Completed,
}

/// A node instance: a type handle plus per-instance parameters and run state.
pub struct NodeState {
    /// Caller-supplied id, unique within the graph.
    pub id: NodeId,
    /// Optional label.
    pub label: Option<String>,
    /// Parameter table.
    pub params: Params,
    /// Input values, seeded per-type and filled before compute.
    pub input_values: Vec<Value>,
    /// Output values, filled by compute.
    pub output_values: Vec<Value>,
    /// Execution state for the current run.
    pub state: ExecutionState,
    node_type: Arc<dyn NodeType>,
    signature: Signature,
}

impl NodeState {
    /// Create an instance of `node_type`, inputs seeded with per-type zeros
    /// so an isolated node can still be computed.
    pub fn new(id: NodeId, node_type: Arc<dyn NodeType>, label: Option<&str>) -> Self {
        let signature = node_type.signature();
        let input_values = signature.inputs.iter().map(|t| t.seed()).collect();
        Self {
            id,
            label: label.map(str::to_string),
            params: Params::new(),
            input_values,
            output_values: Vec::new(),
            state: ExecutionState::Pending,
            node_type,
            signature,
        }
    }

    /// The type's signature (captured at `add_node` time).
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The type handle, for compute dispatch.
    #[must_use]
    pub fn node_type(&self) -> &Arc<dyn NodeType> {
        &self.node_type
    }

    /// Whether this node is the conditional type whose outgoing edges gate
    /// their targets.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.signature.name == CONDITIONAL_TYPE_NAME
    }

    /// Whether this node has reached a terminal state for the current run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            ExecutionState::Completed | ExecutionState::Skipped
        )
    }

    /// Reset run state: re-seed inputs, clear outputs, back to `Pending`.
    pub fn reset(&mut self) {
        self.input_values = self.signature.inputs.iter().map(|t| t.seed()).collect();
        self.output_values.clear();
        self.state = ExecutionState::Pending;
    }
}

impl fmt::Debug for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeState")
            .field("id", &self.id)
            .field("type", &self.signature.name)
            .field("label", &self.label)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
