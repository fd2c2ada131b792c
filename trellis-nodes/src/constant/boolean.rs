//! Constant boolean source.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, ParamSpec, Signature};
use trellis_core::value::{Value, ValueType};

/// Emits the `value` parameter as a constant boolean.
#[derive(Debug, Default)]
pub struct BoolNode;

impl NodeType for BoolNode {
    fn signature(&self) -> Signature {
        Signature::new("Bool")
            .with_description("A constant boolean node")
            .with_outputs(vec![ValueType::Bool])
            .with_params(vec![ParamSpec::bool("value", false, "The boolean value")])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::bool(ctx.params.bool_or("value", false))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::node::Params;

    #[test]
    fn emits_the_value_param() {
        let mut params = Params::new();
        params.set("value", Value::bool(true));
        let ctx = ComputeContext {
            inputs: &[],
            params: &params,
        };
        assert_eq!(BoolNode.compute(&ctx), Ok(vec![Value::bool(true)]));
    }
}
