//! Constant string source.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, ParamSpec, Signature};
use trellis_core::value::{Value, ValueType};

/// Emits the `text` parameter as a constant string.
#[derive(Debug, Default)]
pub struct StringNode;

impl NodeType for StringNode {
    fn signature(&self) -> Signature {
        Signature::new("String")
            .with_description("A constant string node")
            .with_outputs(vec![ValueType::String])
            .with_params(vec![ParamSpec::string("text", "", "The string value")])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::string(ctx.params.string_or("text", ""))])
    }
}
