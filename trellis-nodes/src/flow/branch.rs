//! Conditional branching.

use trellis_core::node::{
    CONDITIONAL_TYPE_NAME, ComputeContext, ComputeResult, NodeType, Signature,
};
use trellis_core::value::{Value, ValueType};

/// The conditional branch node.
///
/// Output 0 carries the condition (then), output 1 its negation (else).
/// Every edge leaving this node additionally gates its target: a node wired
/// to output 0 runs only while the condition is true, a node wired to
/// output 1 only while it is false. The gating itself is derived by the
/// scheduler from the edge set; this compute only evaluates the condition.
#[derive(Debug, Default)]
pub struct IfNode;

impl NodeType for IfNode {
    fn signature(&self) -> Signature {
        Signature::new(CONDITIONAL_TYPE_NAME)
            .with_description(
                "Conditional branching node - routes execution based on boolean condition",
            )
            .with_inputs(vec![ValueType::Bool])
            .with_outputs(vec![ValueType::Bool, ValueType::Bool])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let condition = ctx.bool(0)?;
        tracing::debug!(condition, "branch node evaluated");
        Ok(vec![Value::bool(condition), Value::bool(!condition)])
    }
}
