//! Branch result selection.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, Signature};
use trellis_core::value::{Value, ValueType};

/// Selects between its two number inputs: the first when it is non-zero,
/// otherwise the second.
///
/// This selection rule cannot tell a then-branch that legitimately produced
/// zero apart from one that never ran; callers routing zero-valued results
/// through a Merge get the second input. A control-aware selection keyed off
/// the branch node itself would remove the ambiguity.
#[derive(Debug, Default)]
pub struct MergeNode;

impl NodeType for MergeNode {
    fn signature(&self) -> Signature {
        Signature::new("Merge")
            .with_description(
                "Merges data from conditional branches - passes through the active input",
            )
            .with_inputs(vec![ValueType::Number, ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let then_value = ctx.number(0)?;
        let else_value = ctx.number(1)?;
        let selected = if then_value != 0.0 {
            then_value
        } else {
            else_value
        };
        Ok(vec![Value::number(selected)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::node::Params;

    fn merge(a: f64, b: f64) -> f64 {
        let params = Params::new();
        let inputs = vec![Value::number(a), Value::number(b)];
        let ctx = ComputeContext {
            inputs: &inputs,
            params: &params,
        };
        let outputs = MergeNode.compute(&ctx).unwrap();
        outputs[0].as_number().unwrap()
    }

    #[test]
    fn selects_first_when_non_zero() {
        assert_eq!(merge(5.0, 7.0), 5.0);
        assert_eq!(merge(-1.0, 7.0), -1.0);
    }

    // A zero first input always yields the second; whether that zero came
    // from a real computation or an unset slot is not observable here.
    #[test]
    fn zero_first_input_yields_second() {
        assert_eq!(merge(0.0, 7.0), 7.0);
    }
}
