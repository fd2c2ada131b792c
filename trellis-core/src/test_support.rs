//! Shared fixtures for this crate's unit tests.

use crate::node::{
    CONDITIONAL_TYPE_NAME, ComputeContext, ComputeResult, NodeType, ParamSpec, Signature,
};
use crate::registry::NodeRegistry;
use crate::value::{Value, ValueType};
use std::sync::Arc;

/// Emits its `value` parameter.
pub(crate) struct ConstNumber;

impl NodeType for ConstNumber {
    fn signature(&self) -> Signature {
        Signature::new("ConstNumber")
            .with_outputs(vec![ValueType::Number])
            .with_params(vec![ParamSpec::number("value", 0.0, "Emitted value")])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::number(ctx.params.number_or("value", 0.0))])
    }
}

/// Emits its `value` parameter as a boolean.
pub(crate) struct ConstBool;

impl NodeType for ConstBool {
    fn signature(&self) -> Signature {
        Signature::new("ConstBool")
            .with_outputs(vec![ValueType::Bool])
            .with_params(vec![ParamSpec::bool("value", false, "Emitted value")])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::bool(ctx.params.bool_or("value", false))])
    }
}

/// Adds its two number inputs.
pub(crate) struct Sum;

impl NodeType for Sum {
    fn signature(&self) -> Signature {
        Signature::new("Sum")
            .with_inputs(vec![ValueType::Number, ValueType::Number])
            .with_outputs(vec![ValueType::Number])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::number(ctx.number(0)? + ctx.number(1)?)])
    }
}

/// Uppercases its string input.
pub(crate) struct Shout;

impl NodeType for Shout {
    fn signature(&self) -> Signature {
        Signature::new("Shout")
            .with_inputs(vec![ValueType::String])
            .with_outputs(vec![ValueType::String])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        Ok(vec![Value::string(ctx.string(0)?.to_uppercase())])
    }
}

/// A conditional fixture carrying the distinguished type name.
pub(crate) struct Branch;

impl NodeType for Branch {
    fn signature(&self) -> Signature {
        Signature::new(CONDITIONAL_TYPE_NAME)
            .with_inputs(vec![ValueType::Bool])
            .with_outputs(vec![ValueType::Bool, ValueType::Bool])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let condition = ctx.bool(0)?;
        Ok(vec![Value::bool(condition), Value::bool(!condition)])
    }
}

/// A registry seeded with the fixtures above.
pub(crate) fn test_registry() -> Arc<NodeRegistry> {
    let mut registry = NodeRegistry::new();
    registry.register(ConstNumber);
    registry.register(ConstBool);
    registry.register(Sum);
    registry.register(Shout);
    registry.register(Branch);
    Arc::new(registry)
}
