//! Number multiplication.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};

/// Multiplies its two number inputs.
#[derive(Debug, Default)]
pub struct MultiplyNode;

impl NodeType for MultiplyNode {
    fn signature(&self) -> Signature {
        Signature::new("Multiply")
            .with_description("Multiplies two numbers together")
            .with_inputs(vec![ValueType::Number, ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let a = ctx.number(0)?;
        let b = ctx.number(1)?;
        Ok(vec![Value::number(a * b)])
    }
}
