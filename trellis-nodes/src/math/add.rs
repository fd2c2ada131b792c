//! Number addition.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};

/// Adds its two number inputs.
///
/// Registered as `AddNumber`; the standard registry also carries the legacy
/// `Add` alias for it.
#[derive(Debug, Default)]
pub struct AddNode;

impl NodeType for AddNode {
    fn signature(&self) -> Signature {
        Signature::new("AddNumber")
            .with_description("Adds two numbers together")
            .with_inputs(vec![ValueType::Number, ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let a = ctx.number(0)?;
        let b = ctx.number(1)?;
        Ok(vec![Value::number(a + b)])
    }
}
