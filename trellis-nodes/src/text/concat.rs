//! String concatenation.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};

/// Concatenates its two string inputs byte-wise.
#[derive(Debug, Default)]
pub struct ConcatNode;

impl NodeType for ConcatNode {
    fn signature(&self) -> Signature {
        Signature::new("Concat")
            .with_description("Concatenates two strings")
            .with_inputs(vec![ValueType::String, ValueType::String])
            .with_outputs(vec![ValueType::String])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let a = ctx.string(0)?;
        let b = ctx.string(1)?;
        Ok(vec![Value::string(format!("{a}{b}"))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::node::Params;

    #[test]
    fn concatenates_in_order() {
        let params = Params::new();
        let inputs = vec![Value::string("x="), Value::string("2a")];
        let ctx = ComputeContext {
            inputs: &inputs,
            params: &params,
        };
        assert_eq!(ConcatNode.compute(&ctx), Ok(vec![Value::string("x=2a")]));
    }

    #[test]
    fn rejects_non_string_input() {
        let params = Params::new();
        let inputs = vec![Value::string("x"), Value::number(1.0)];
        let ctx = ComputeContext {
            inputs: &inputs,
            params: &params,
        };
        assert!(ConcatNode.compute(&ctx).is_err());
    }
}
