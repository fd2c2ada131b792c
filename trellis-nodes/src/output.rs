//! Observable output nodes.
//!
//! Identity pass-throughs that mark a spot in the graph as externally
//! observable; callers register pins against them with `add_output`.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};

/// Identity over a number, designating an observable pin.
#[derive(Debug, Default)]
pub struct OutputNumberNode;

impl NodeType for OutputNumberNode {
    fn signature(&self) -> Signature {
        Signature::new("OutputNumber")
            .with_description("Outputs a number value")
            .with_inputs(vec![ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::number(ctx.number(0)?)])
    }
}

/// Identity over a string, designating an observable pin.
#[derive(Debug, Default)]
pub struct OutputStringNode;

impl NodeType for OutputStringNode {
    fn signature(&self) -> Signature {
        Signature::new("OutputString")
            .with_description("Outputs a string value")
            .with_inputs(vec![ValueType::String])
            .with_outputs(vec![ValueType::String])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::string(ctx.string(0)?)])
    }
}
