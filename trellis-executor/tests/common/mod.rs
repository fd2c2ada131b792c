//! Shared builders for executor integration tests.
#![allow(dead_code)]

use trellis_core::error::Result;
use trellis_core::graph::Graph;
use trellis_core::types::NodeId;
use trellis_core::value::Value;
use trellis_executor::executor::{Executor, ExecutorConfig};
use trellis_nodes::standard_registry;

pub fn id(i: i32) -> NodeId {
    NodeId::new(i)
}

pub fn new_graph() -> Graph {
    Graph::new(standard_registry())
}

pub async fn run(graph: &mut Graph) -> Result<()> {
    Executor::new(ExecutorConfig::default()).execute(graph).await
}

/// Add a `Number` constant with the given value.
pub fn number_source(graph: &mut Graph, node: i32, value: f64) {
    graph.add_node(id(node), "Number", None).unwrap();
    graph
        .set_param(id(node), "value", Value::number(value))
        .unwrap();
}

/// Add a `Bool` constant with the given value.
pub fn bool_source(graph: &mut Graph, node: i32, value: bool) {
    graph.add_node(id(node), "Bool", None).unwrap();
    graph
        .set_param(id(node), "value", Value::bool(value))
        .unwrap();
}

/// Add a `String` constant with the given text.
pub fn string_source(graph: &mut Graph, node: i32, text: &str) {
    graph.add_node(id(node), "String", None).unwrap();
    graph
        .set_param(id(node), "text", Value::string(text))
        .unwrap();
}

/// Build the wide reduction graph: `width` number sources feeding pair-wise
/// adders down to a single `OutputNumber` pin. Sources hold 0..width.
/// `width` must be a power of two.
pub fn build_reduction_graph(width: i32) -> Graph {
    assert!(width > 1 && (width & (width - 1)) == 0);
    let mut graph = new_graph();
    let mut next_id = 0;

    let mut layer: Vec<i32> = Vec::new();
    for i in 0..width {
        number_source(&mut graph, next_id, f64::from(i));
        layer.push(next_id);
        next_id += 1;
    }

    while layer.len() > 1 {
        let mut reduced = Vec::new();
        for pair in layer.chunks(2) {
            graph.add_node(id(next_id), "AddNumber", None).unwrap();
            graph.connect(id(pair[0]), 0, id(next_id), 0).unwrap();
            graph.connect(id(pair[1]), 0, id(next_id), 1).unwrap();
            reduced.push(next_id);
            next_id += 1;
        }
        layer = reduced;
    }

    graph.add_node(id(next_id), "OutputNumber", None).unwrap();
    graph.connect(id(layer[0]), 0, id(next_id), 0).unwrap();
    graph.add_output(id(next_id), 0).unwrap();
    graph
}
