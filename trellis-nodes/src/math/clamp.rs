//! Number clamping.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};

/// Clamps a value between a lower and an upper bound.
///
/// Inputs are (value, min, max); the result is `min(max(value, min), max)`.
#[derive(Debug, Default)]
pub struct ClampNode;

impl NodeType for ClampNode {
    fn signature(&self) -> Signature {
        Signature::new("ClampNumber")
            .with_description("Clamps a value between min and max bounds")
            .with_inputs(vec![ValueType::Number, ValueType::Number, ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let value = ctx.number(0)?;
        let lo = ctx.number(1)?;
        let hi = ctx.number(2)?;
        Ok(vec![Value::number(value.max(lo).min(hi))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::node::Params;

    fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
        let params = Params::new();
        let inputs = vec![
            Value::number(value),
            Value::number(lo),
            Value::number(hi),
        ];
        let ctx = ComputeContext {
            inputs: &inputs,
            params: &params,
        };
        let outputs = ClampNode.compute(&ctx).unwrap();
        outputs[0].as_number().unwrap()
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 10.0), 10.0);
    }
}
