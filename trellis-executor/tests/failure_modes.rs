//! Integration tests for cycles, compute failures, and panic translation.

mod common;

use common::{id, new_graph, number_source, run};
use std::sync::Arc;
use trellis_core::error::TrellisError;
use trellis_core::graph::Graph;
use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};
use trellis_nodes::create_standard_registry;

/// Always fails with a fixed reason.
struct FailingNode;

impl NodeType for FailingNode {
    fn signature(&self) -> Signature {
        Signature::new("AlwaysFail")
            .with_inputs(vec![ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, _ctx: &ComputeContext<'_>) -> ComputeResult {
        Err("synthetic failure".to_string())
    }
}

/// Declares two outputs but produces only one.
struct ShortNode;

impl NodeType for ShortNode {
    fn signature(&self) -> Signature {
        Signature::new("ShortOutput")
            .with_outputs(vec![ValueType::Number, ValueType::Number])
    }

    fn compute(&self, _ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::number(1.0)])
    }
}

/// Panics instead of returning.
struct PanickingNode;

impl NodeType for PanickingNode {
    fn signature(&self) -> Signature {
        Signature::new("AlwaysPanic").with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, _ctx: &ComputeContext<'_>) -> ComputeResult {
        panic!("compute blew up");
    }
}

fn graph_with_test_nodes() -> Graph {
    let mut registry = create_standard_registry();
    registry.register(FailingNode);
    registry.register(ShortNode);
    registry.register(PanickingNode);
    Graph::new(Arc::new(registry))
}

#[tokio::test]
async fn cycle_aborts_before_any_compute() {
    let mut graph = new_graph();
    graph.add_node(id(1), "AddNumber", None).unwrap();
    graph.add_node(id(2), "AddNumber", None).unwrap();
    graph.connect(id(1), 0, id(2), 0).unwrap();
    graph.connect(id(2), 0, id(1), 0).unwrap();
    graph.add_output(id(1), 0).unwrap();

    let err = run(&mut graph).await.unwrap_err();
    assert!(err.to_string().contains("Cycle"));

    // No partial outputs are observable.
    assert!(matches!(
        graph.output_number(0).unwrap_err(),
        TrellisError::NotComputed { .. }
    ));
}

#[tokio::test]
async fn compute_failure_is_prefixed_with_the_type_name() {
    let mut graph = graph_with_test_nodes();
    number_source(&mut graph, 1, 1.0);
    graph.add_node(id(2), "AlwaysFail", None).unwrap();
    graph.connect(id(1), 0, id(2), 0).unwrap();
    graph.add_output(id(2), 0).unwrap();

    let err = run(&mut graph).await.unwrap_err();
    match &err {
        TrellisError::Compute { type_name, reason } => {
            assert_eq!(type_name, "AlwaysFail");
            assert_eq!(reason, "synthetic failure");
        }
        other => panic!("expected Compute, got {other}"),
    }
    assert!(err.to_string().contains("AlwaysFail compute failed"));

    assert!(matches!(
        graph.output_number(0).unwrap_err(),
        TrellisError::NotComputed { .. }
    ));
}

#[tokio::test]
async fn failure_does_not_hide_already_completed_outputs() {
    let mut graph = graph_with_test_nodes();
    number_source(&mut graph, 1, 3.0);
    graph.add_node(id(2), "AlwaysFail", None).unwrap();
    graph.connect(id(1), 0, id(2), 0).unwrap();
    graph.add_output(id(1), 0).unwrap();

    assert!(run(&mut graph).await.is_err());
    // The source finished before the failure; its pin still reads.
    assert_eq!(graph.output_number(0).unwrap(), 3.0);
}

#[tokio::test]
async fn missing_output_index_is_a_dangling_edge() {
    let mut graph = graph_with_test_nodes();
    graph.add_node(id(1), "ShortOutput", None).unwrap();
    graph.add_node(id(2), "OutputNumber", None).unwrap();
    // Output 1 is declared by the signature but never produced.
    graph.connect(id(1), 1, id(2), 0).unwrap();

    let err = run(&mut graph).await.unwrap_err();
    match err {
        TrellisError::DanglingEdge {
            node_id,
            from_node,
            from_out,
            ..
        } => {
            assert_eq!(node_id, id(2));
            assert_eq!(from_node, id(1));
            assert_eq!(from_out, 1);
        }
        other => panic!("expected DanglingEdge, got {other}"),
    }
}

#[tokio::test]
async fn panic_translates_into_a_compute_error() {
    let mut graph = graph_with_test_nodes();
    graph.add_node(id(1), "AlwaysPanic", None).unwrap();
    graph.add_output(id(1), 0).unwrap();

    let err = run(&mut graph).await.unwrap_err();
    assert!(matches!(err, TrellisError::ComputePanic));
}

#[tokio::test]
async fn first_failure_wins_and_the_run_drains() {
    // Two independent failing nodes: the run reports exactly one failure
    // and returns only after the pool is quiet.
    let mut graph = graph_with_test_nodes();
    number_source(&mut graph, 1, 1.0);
    graph.add_node(id(2), "AlwaysFail", None).unwrap();
    graph.add_node(id(3), "AlwaysFail", None).unwrap();
    graph.connect(id(1), 0, id(2), 0).unwrap();
    graph.connect(id(1), 0, id(3), 0).unwrap();

    let err = run(&mut graph).await.unwrap_err();
    assert!(matches!(err, TrellisError::Compute { .. }));
}
