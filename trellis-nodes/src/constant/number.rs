//! Constant number source.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, ParamSpec, Signature};
use trellis_core::value::{Value, ValueType};

/// Emits the `value` parameter as a constant number.
#[derive(Debug, Default)]
pub struct NumberNode;

impl NodeType for NumberNode {
    fn signature(&self) -> Signature {
        Signature::new("Number")
            .with_description("A constant number node")
            .with_outputs(vec![ValueType::Number])
            .with_params(vec![ParamSpec::number("value", 0.0, "The numeric value")])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::number(ctx.params.number_or("value", 0.0))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::node::Params;

    #[test]
    fn emits_default_without_param() {
        let params = Params::new();
        let ctx = ComputeContext {
            inputs: &[],
            params: &params,
        };
        assert_eq!(NumberNode.compute(&ctx), Ok(vec![Value::number(0.0)]));
    }

    #[test]
    fn emits_the_value_param() {
        let mut params = Params::new();
        params.set("value", Value::number(2.5));
        let ctx = ComputeContext {
            inputs: &[],
            params: &params,
        };
        assert_eq!(NumberNode.compute(&ctx), Ok(vec![Value::number(2.5)]));
    }

    #[test]
    fn wrong_typed_param_falls_back_to_default() {
        let mut params = Params::new();
        params.set("value", Value::string("nope"));
        let ctx = ComputeContext {
            inputs: &[],
            params: &params,
        };
        assert_eq!(NumberNode.compute(&ctx), Ok(vec![Value::number(0.0)]));
    }
}
