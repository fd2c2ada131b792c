//! Schedule analysis over a committed graph.
//!
//! Derives everything a run needs from the edge set: per-node indegrees,
//! fanout lists, the port-indexed input map, and the control edges implied
//! by conditional sources — and proves the graph acyclic before any compute
//! runs.

use std::collections::{HashMap, VecDeque};
use trellis_core::error::{Result, TrellisError};
use trellis_core::graph::{ControlEdge, Graph};
use trellis_core::types::NodeId;

/// The authoritative source for one input slot.
///
/// Later connects on the same slot overwrite earlier ones; a slot nobody
/// connected stays unbound and keeps its seeded value at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBinding {
    /// The source node.
    pub source: NodeId,
    /// The source output index.
    pub output: usize,
    /// True when the edge exists only to gate the target: its source is the
    /// conditional type and the socket types do not line up, so no data
    /// flows across it.
    pub control_only: bool,
}

/// Derived scheduling state for one run.
#[derive(Debug, Default)]
pub struct Schedule {
    /// Incoming data-edge count per node.
    pub indegree: HashMap<NodeId, usize>,
    /// Edge targets per source node, one entry per edge.
    pub fanout: HashMap<NodeId, Vec<NodeId>>,
    /// Per-node slot bindings, indexed by input port.
    pub input_map: HashMap<NodeId, Vec<Option<SlotBinding>>>,
    /// Gating dependencies derived from conditional sources.
    pub control_edges: Vec<ControlEdge>,
}

impl Schedule {
    /// Analyze `graph` and prove it acyclic.
    pub fn analyze(graph: &Graph) -> Result<Self> {
        let mut indegree: HashMap<NodeId, usize> =
            graph.nodes().map(|n| (n.id, 0)).collect();
        let mut fanout: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut input_map: HashMap<NodeId, Vec<Option<SlotBinding>>> = graph
            .nodes()
            .map(|n| (n.id, vec![None; n.signature().inputs.len()]))
            .collect();
        let mut control_edges = Vec::new();

        for edge in graph.edges() {
            *indegree.entry(edge.to).or_default() += 1;
            fanout.entry(edge.from).or_default().push(edge.to);

            let conditional_source = graph.node(edge.from).is_some_and(|n| n.is_conditional());
            if conditional_source {
                control_edges.push(ControlEdge {
                    branch: edge.from,
                    port: edge.from_out,
                    target: edge.to,
                    condition: edge.from_out == 0,
                });
            }

            let source_type = graph
                .node(edge.from)
                .and_then(|n| n.signature().outputs.get(edge.from_out).copied());
            let target_type = graph
                .node(edge.to)
                .and_then(|n| n.signature().inputs.get(edge.to_in).copied());
            let control_only = conditional_source && source_type != target_type;

            if let Some(slots) = input_map.get_mut(&edge.to) {
                if let Some(slot) = slots.get_mut(edge.to_in) {
                    *slot = Some(SlotBinding {
                        source: edge.from,
                        output: edge.from_out,
                        control_only,
                    });
                }
            }
        }

        let schedule = Self {
            indegree,
            fanout,
            input_map,
            control_edges,
        };
        schedule.prove_acyclic(graph)?;
        Ok(schedule)
    }

    /// Nodes with no incoming data edges, sorted by id.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = self
            .indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        roots.sort();
        roots
    }

    /// Kahn's algorithm over the indegree/fanout maps; any node left with
    /// positive indegree after the queue drains sits on a cycle.
    fn prove_acyclic(&self, graph: &Graph) -> Result<()> {
        let mut remaining = self.indegree.clone();
        let mut queue: VecDeque<NodeId> = remaining
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut visited = 0usize;

        while let Some(id) = queue.pop_front() {
            visited += 1;
            if let Some(targets) = self.fanout.get(&id) {
                for target in targets {
                    if let Some(degree) = remaining.get_mut(target) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(*target);
                        }
                    }
                }
            }
        }

        if visited != graph.node_count() {
            let mut nodes: Vec<NodeId> = remaining
                .iter()
                .filter(|(_, degree)| **degree > 0)
                .map(|(id, _)| *id)
                .collect();
            nodes.sort();
            return Err(TrellisError::CycleDetected { nodes });
        }
        Ok(())
    }
}
