//! Error types for trellis.
//!
//! One strongly-typed error enum covers every failure a caller can observe,
//! from graph construction through execution to output reads. Each variant
//! carries the identifiers needed to act on it, and every display string is
//! prefixed with a stable `E###` code.

use crate::types::NodeId;
use crate::value::ValueType;
use thiserror::Error;

/// The main error type for trellis operations.
#[derive(Error, Debug)]
pub enum TrellisError {
    // =========================================================================
    // Construction Errors (E100-E199)
    // =========================================================================
    /// Reference to a type name absent from the registry.
    #[error("E101: Unknown node type '{type_name}'")]
    UnknownType {
        /// The type name that was not found.
        type_name: String,
    },

    /// `add_node` with an id already present in the graph.
    #[error("E102: Duplicate node id {node_id}")]
    DuplicateNode {
        /// The id that already exists.
        node_id: NodeId,
    },

    /// Reference to a node id absent from the graph.
    #[error("E103: Unknown node {node_id}")]
    UnknownNode {
        /// The id that was not found.
        node_id: NodeId,
    },

    /// An input port index past the node's input arity.
    #[error("E104: Input {index} out of range on {node_id} ({arity} inputs)")]
    InputPortOutOfRange {
        /// The node whose input was addressed.
        node_id: NodeId,
        /// The offending index.
        index: usize,
        /// The node's input arity.
        arity: usize,
    },

    /// An output port index past the node's output arity.
    #[error("E105: Output {index} out of range on {node_id} ({arity} outputs)")]
    OutputPortOutOfRange {
        /// The node whose output was addressed.
        node_id: NodeId,
        /// The offending index.
        index: usize,
        /// The node's output arity.
        arity: usize,
    },

    /// `connect` between sockets of different types.
    #[error(
        "E106: Socket type mismatch: {from_node} output {from_out} is {found}, \
         {to_node} input {to_in} expects {expected}"
    )]
    SocketTypeMismatch {
        /// The source node.
        from_node: NodeId,
        /// The source output index.
        from_out: usize,
        /// The source output type.
        found: ValueType,
        /// The target node.
        to_node: NodeId,
        /// The target input index.
        to_in: usize,
        /// The target input type.
        expected: ValueType,
    },

    // =========================================================================
    // Schedule Errors (E200-E299)
    // =========================================================================
    /// The committed edge set is not a DAG.
    #[error("E201: Cycle detected in graph involving nodes: {nodes:?}")]
    CycleDetected {
        /// The nodes left unordered by the topological sort.
        nodes: Vec<NodeId>,
    },

    // =========================================================================
    // Execution Errors (E300-E399)
    // =========================================================================
    /// A bound input referenced an output index its source never produced.
    #[error(
        "E301: Dangling edge: {node_id} input {input} reads missing output \
         {from_out} of {from_node}"
    )]
    DanglingEdge {
        /// The node pulling its inputs.
        node_id: NodeId,
        /// The input slot being filled.
        input: usize,
        /// The source node.
        from_node: NodeId,
        /// The missing output index.
        from_out: usize,
    },

    /// A compute function reported failure.
    #[error("E302: {type_name} compute failed: {reason}")]
    Compute {
        /// The node type whose compute failed.
        type_name: String,
        /// The reason reported by the compute function.
        reason: String,
    },

    /// A compute function panicked instead of returning.
    #[error("E303: a compute function panicked")]
    ComputePanic,

    // =========================================================================
    // Output Read Errors (E400-E499)
    // =========================================================================
    /// An output pin index past the pin list.
    #[error("E401: Output index {index} out of range ({count} pins)")]
    PinOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of registered pins.
        count: usize,
    },

    /// The pin's producer was skipped or never completed.
    #[error("E402: Output {index} not computed")]
    NotComputed {
        /// The pin index.
        index: usize,
    },

    /// A typed getter was used on a pin of a different type.
    #[error("E403: Output {index} is {actual}, expected {expected}")]
    OutputTypeMismatch {
        /// The pin index.
        index: usize,
        /// The type the getter asked for.
        expected: ValueType,
        /// The type the pin carries.
        actual: ValueType,
    },

    // =========================================================================
    // Plan Errors (E500-E599)
    // =========================================================================
    /// A plan document could not be parsed or has an unsupported shape.
    #[error("E501: Invalid plan: {cause}")]
    InvalidPlan {
        /// Description of the problem.
        cause: String,
    },
}

impl TrellisError {
    /// Get the error code (e.g., "E101").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "E101",
            Self::DuplicateNode { .. } => "E102",
            Self::UnknownNode { .. } => "E103",
            Self::InputPortOutOfRange { .. } => "E104",
            Self::OutputPortOutOfRange { .. } => "E105",
            Self::SocketTypeMismatch { .. } => "E106",
            Self::CycleDetected { .. } => "E201",
            Self::DanglingEdge { .. } => "E301",
            Self::Compute { .. } => "E302",
            Self::ComputePanic => "E303",
            Self::PinOutOfRange { .. } => "E401",
            Self::NotComputed { .. } => "E402",
            Self::OutputTypeMismatch { .. } => "E403",
            Self::InvalidPlan { .. } => "E501",
        }
    }

    /// Check if this error arose while building the graph.
    #[must_use]
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownType { .. }
                | Self::DuplicateNode { .. }
                | Self::UnknownNode { .. }
                | Self::InputPortOutOfRange { .. }
                | Self::OutputPortOutOfRange { .. }
                | Self::SocketTypeMismatch { .. }
        )
    }

    /// Check if this error arose while running the graph.
    #[must_use]
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            Self::CycleDetected { .. }
                | Self::DanglingEdge { .. }
                | Self::Compute { .. }
                | Self::ComputePanic
        )
    }
}

/// Result type alias using `TrellisError`.
pub type Result<T> = std::result::Result<T, TrellisError>;
