//! Edges and output pins.

use crate::types::NodeId;

/// A directed data edge between two sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Source node.
    pub from: NodeId,
    /// Source output index.
    pub from_out: usize,
    /// Target node.
    pub to: NodeId,
    /// Target input index.
    pub to_in: usize,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub fn new(from: NodeId, from_out: usize, to: NodeId, to_in: usize) -> Self {
        Self {
            from,
            from_out,
            to,
            to_in,
        }
    }
}

/// An externally observable output: a node's output socket, in caller order.
///
/// The position of a pin in the graph's pin list is the external output
/// index handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPin {
    /// The producing node.
    pub node: NodeId,
    /// The output index on that node.
    pub output: usize,
}

/// A gating dependency derived from a data edge whose source is the
/// conditional type. Re-derived on every run; never declared by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEdge {
    /// The conditional node.
    pub branch: NodeId,
    /// Which of its outputs the edge leaves from (0 = then, 1 = else).
    pub port: usize,
    /// The gated node.
    pub target: NodeId,
    /// The condition value under which the target runs.
    pub condition: bool,
}
