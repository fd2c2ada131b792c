//! The graph builder and output reads.

use super::edge::{ControlEdge, Edge, OutputPin};
use super::node::{ExecutionState, NodeState};
use crate::error::{Result, TrellisError};
use crate::registry::NodeRegistry;
use crate::types::NodeId;
use crate::value::{Value, ValueType};
use std::collections::HashMap;
use std::sync::Arc;

/// A dataflow graph under construction or execution.
///
/// Single-writer before a run; the executor is the only writer during one.
/// A graph handle must not be mutated or run concurrently from multiple
/// threads, but independent graphs may run at the same time.
pub struct Graph {
    registry: Arc<NodeRegistry>,
    nodes: HashMap<NodeId, NodeState>,
    edges: Vec<Edge>,
    outputs: Vec<OutputPin>,
    control_edges: Vec<ControlEdge>,
}

impl Graph {
    /// Create an empty graph resolving type names against `registry`.
    #[must_use]
    pub fn new(registry: Arc<NodeRegistry>) -> Self {
        Self {
            registry,
            nodes: HashMap::new(),
            edges: Vec::new(),
            outputs: Vec::new(),
            control_edges: Vec::new(),
        }
    }

    /// The registry this graph resolves against.
    #[must_use]
    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    // ── Construction ──

    /// Register a node instance under a caller-chosen id.
    pub fn add_node(&mut self, id: NodeId, type_name: &str, label: Option<&str>) -> Result<()> {
        if self.nodes.contains_key(&id) {
            return Err(TrellisError::DuplicateNode { node_id: id });
        }
        let node_type = self
            .registry
            .get(type_name)
            .ok_or_else(|| TrellisError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        self.nodes.insert(id, NodeState::new(id, node_type, label));
        Ok(())
    }

    /// Upsert a parameter on a node. No schema check happens here; compute
    /// functions read only the keys they know.
    pub fn set_param(&mut self, id: NodeId, key: &str, value: Value) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(TrellisError::UnknownNode { node_id: id })?;
        node.params.set(key, value);
        Ok(())
    }

    /// Append a data edge after validating both sockets.
    ///
    /// Socket types must match, with one exception: an edge leaving the
    /// conditional type is accepted regardless of the target's type — such
    /// an edge gates its target, and when the types differ it carries no
    /// data (the target slot keeps its seeded value at pull time).
    pub fn connect(
        &mut self,
        from: NodeId,
        from_out: usize,
        to: NodeId,
        to_in: usize,
    ) -> Result<()> {
        let source = self
            .nodes
            .get(&from)
            .ok_or(TrellisError::UnknownNode { node_id: from })?;
        let target = self
            .nodes
            .get(&to)
            .ok_or(TrellisError::UnknownNode { node_id: to })?;

        let out_arity = source.signature().outputs.len();
        let found = *source.signature().outputs.get(from_out).ok_or(
            TrellisError::OutputPortOutOfRange {
                node_id: from,
                index: from_out,
                arity: out_arity,
            },
        )?;
        let in_arity = target.signature().inputs.len();
        let expected =
            *target
                .signature()
                .inputs
                .get(to_in)
                .ok_or(TrellisError::InputPortOutOfRange {
                    node_id: to,
                    index: to_in,
                    arity: in_arity,
                })?;

        if found != expected && !source.is_conditional() {
            return Err(TrellisError::SocketTypeMismatch {
                from_node: from,
                from_out,
                found,
                to_node: to,
                to_in,
                expected,
            });
        }

        self.edges.push(Edge::new(from, from_out, to, to_in));
        Ok(())
    }

    /// Append an output pin. Its position in the pin list is the external
    /// output index.
    pub fn add_output(&mut self, id: NodeId, out_idx: usize) -> Result<()> {
        let node = self
            .nodes
            .get(&id)
            .ok_or(TrellisError::UnknownNode { node_id: id })?;
        let arity = node.signature().outputs.len();
        if out_idx >= arity {
            return Err(TrellisError::OutputPortOutOfRange {
                node_id: id,
                index: out_idx,
                arity,
            });
        }
        self.outputs.push(OutputPin {
            node: id,
            output: out_idx,
        });
        Ok(())
    }

    // ── Access ──

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(&id)
    }

    /// Get a node by id, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeState> {
        self.nodes.get_mut(&id)
    }

    /// Iterate all nodes. Iteration order is arbitrary; callers must not
    /// rely on it.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeState> {
        self.nodes.values()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The committed data edges, in connect order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The registered output pins, in caller order.
    #[must_use]
    pub fn output_pins(&self) -> &[OutputPin] {
        &self.outputs
    }

    /// Control edges derived by the most recent schedule analysis.
    #[must_use]
    pub fn control_edges(&self) -> &[ControlEdge] {
        &self.control_edges
    }

    /// Replace the derived control edges (called per run by the executor).
    pub fn set_control_edges(&mut self, control_edges: Vec<ControlEdge>) {
        self.control_edges = control_edges;
    }

    /// Reset all per-run state: inputs re-seeded, outputs cleared, every
    /// node back to `Pending`, derived control edges dropped.
    pub fn reset_run_state(&mut self) {
        for node in self.nodes.values_mut() {
            node.reset();
        }
        self.control_edges.clear();
    }

    // ── Output reads ──

    /// Number of registered output pins.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// The declared socket type of an output pin.
    pub fn output_type(&self, index: usize) -> Result<ValueType> {
        let pin = self.pin(index)?;
        let node = self
            .nodes
            .get(&pin.node)
            .ok_or(TrellisError::UnknownNode { node_id: pin.node })?;
        node.signature()
            .outputs
            .get(pin.output)
            .copied()
            .ok_or(TrellisError::OutputPortOutOfRange {
                node_id: pin.node,
                index: pin.output,
                arity: node.signature().outputs.len(),
            })
    }

    /// The value behind an output pin. Fails with `NotComputed` unless the
    /// producer completed in the most recent run.
    pub fn output_value(&self, index: usize) -> Result<&Value> {
        let pin = self.pin(index)?;
        let node = self
            .nodes
            .get(&pin.node)
            .ok_or(TrellisError::UnknownNode { node_id: pin.node })?;
        if node.state != ExecutionState::Completed {
            return Err(TrellisError::NotComputed { index });
        }
        node.output_values
            .get(pin.output)
            .ok_or(TrellisError::NotComputed { index })
    }

    /// Read output pin `index` as a number.
    pub fn output_number(&self, index: usize) -> Result<f64> {
        let value = self.output_value(index)?;
        value
            .as_number()
            .ok_or_else(|| TrellisError::OutputTypeMismatch {
                index,
                expected: ValueType::Number,
                actual: value.value_type(),
            })
    }

    /// Read output pin `index` as a string slice.
    pub fn output_string(&self, index: usize) -> Result<&str> {
        let value = self.output_value(index)?;
        value
            .as_str()
            .ok_or_else(|| TrellisError::OutputTypeMismatch {
                index,
                expected: ValueType::String,
                actual: value.value_type(),
            })
    }

    /// Read output pin `index` as a boolean.
    pub fn output_bool(&self, index: usize) -> Result<bool> {
        let value = self.output_value(index)?;
        value
            .as_bool()
            .ok_or_else(|| TrellisError::OutputTypeMismatch {
                index,
                expected: ValueType::Bool,
                actual: value.value_type(),
            })
    }

    fn pin(&self, index: usize) -> Result<OutputPin> {
        self.outputs
            .get(index)
            .copied()
            .ok_or(TrellisError::PinOutOfRange {
                index,
                count: self.outputs.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_registry;

    fn id(i: i32) -> NodeId {
        NodeId::new(i)
    }

    fn graph() -> Graph {
        Graph::new(test_registry())
    }

    #[test]
    fn add_node_validates_id_and_type() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();

        let err = g.add_node(id(1), "ConstNumber", None).unwrap_err();
        assert!(matches!(err, TrellisError::DuplicateNode { .. }));

        let err = g.add_node(id(2), "Bogus", None).unwrap_err();
        assert!(matches!(err, TrellisError::UnknownType { .. }));
    }

    #[test]
    fn add_node_seeds_inputs() {
        let mut g = graph();
        g.add_node(id(1), "Sum", None).unwrap();

        let node = g.node(id(1)).unwrap();
        assert_eq!(node.input_values, vec![Value::number(0.0); 2]);
        assert!(node.output_values.is_empty());
        assert_eq!(node.state, ExecutionState::Pending);
    }

    #[test]
    fn set_param_is_schema_free() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();

        // A key the type never declared is tolerated.
        g.set_param(id(1), "whatever", Value::bool(true)).unwrap();
        g.set_param(id(1), "value", Value::number(3.0)).unwrap();

        let err = g
            .set_param(id(9), "value", Value::number(1.0))
            .unwrap_err();
        assert!(matches!(err, TrellisError::UnknownNode { .. }));
    }

    #[test]
    fn connect_validates_sockets() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();
        g.add_node(id(2), "Sum", None).unwrap();
        g.add_node(id(3), "Shout", None).unwrap();

        g.connect(id(1), 0, id(2), 0).unwrap();

        let err = g.connect(id(1), 1, id(2), 0).unwrap_err();
        assert!(matches!(err, TrellisError::OutputPortOutOfRange { .. }));

        let err = g.connect(id(1), 0, id(2), 5).unwrap_err();
        assert!(matches!(err, TrellisError::InputPortOutOfRange { .. }));

        let err = g.connect(id(9), 0, id(2), 0).unwrap_err();
        assert!(matches!(err, TrellisError::UnknownNode { .. }));

        // Number output into a string input.
        let err = g.connect(id(1), 0, id(3), 0).unwrap_err();
        assert!(matches!(err, TrellisError::SocketTypeMismatch { .. }));
        // The rejected edge was not added.
        assert_eq!(g.edges().len(), 1);
    }

    #[test]
    fn conditional_source_bypasses_type_check() {
        let mut g = graph();
        g.add_node(id(1), "If", None).unwrap();
        g.add_node(id(2), "Sum", None).unwrap();

        // Bool output into a number input: accepted as a gating attachment.
        g.connect(id(1), 0, id(2), 0).unwrap();
        assert_eq!(g.edges().len(), 1);
    }

    #[test]
    fn add_output_validates_pin() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();

        g.add_output(id(1), 0).unwrap();
        assert_eq!(g.output_count(), 1);

        let err = g.add_output(id(1), 3).unwrap_err();
        assert!(matches!(err, TrellisError::OutputPortOutOfRange { .. }));

        let err = g.add_output(id(9), 0).unwrap_err();
        assert!(matches!(err, TrellisError::UnknownNode { .. }));
    }

    #[test]
    fn output_reads_before_any_run() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();
        g.add_output(id(1), 0).unwrap();

        // Declared type is known without running.
        assert_eq!(g.output_type(0).unwrap(), ValueType::Number);
        // Value is not.
        assert!(matches!(
            g.output_number(0).unwrap_err(),
            TrellisError::NotComputed { .. }
        ));
        assert!(matches!(
            g.output_number(5).unwrap_err(),
            TrellisError::PinOutOfRange { .. }
        ));
    }

    #[test]
    fn typed_getter_checks_pin_type() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();
        g.add_output(id(1), 0).unwrap();

        // Force a completed state to exercise the typed read.
        {
            let node = g.node_mut(id(1)).unwrap();
            node.output_values = vec![Value::number(4.0)];
            node.state = ExecutionState::Completed;
        }
        assert_eq!(g.output_number(0).unwrap(), 4.0);
        assert!(matches!(
            g.output_string(0).unwrap_err(),
            TrellisError::OutputTypeMismatch { .. }
        ));
    }

    #[test]
    fn reset_clears_run_state() {
        let mut g = graph();
        g.add_node(id(1), "ConstNumber", None).unwrap();
        {
            let node = g.node_mut(id(1)).unwrap();
            node.output_values = vec![Value::number(4.0)];
            node.state = ExecutionState::Completed;
        }

        g.reset_run_state();
        let node = g.node(id(1)).unwrap();
        assert!(node.output_values.is_empty());
        assert_eq!(node.state, ExecutionState::Pending);
    }
}
