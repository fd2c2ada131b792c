//! Number-to-string conversion.

use trellis_core::node::{ComputeContext, ComputeResult, NodeType, ParamSpec, Signature};
use trellis_core::value::{Value, ValueType};

/// Renders a number as a string.
///
/// The `format` parameter selects the rendering:
/// - `default` — shortest round-trip decimal
/// - `fixed` — six fractional digits
/// - `scientific` — exponent notation
/// - `hex` — truncate to a 32-bit signed integer, lowercase hex
#[derive(Debug, Default)]
pub struct ToStringNode;

impl NodeType for ToStringNode {
    fn signature(&self) -> Signature {
        Signature::new("ToString")
            .with_description("Converts a number to string with formatting options")
            .with_inputs(vec![ValueType::Number])
            .with_outputs(vec![ValueType::String])
            .with_params(vec![ParamSpec::string_enum(
                "format",
                "default",
                &["default", "fixed", "scientific", "hex"],
                "Number formatting style",
            )])
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult {
        let value = ctx.number(0)?;
        let format = ctx.params.string_or("format", "default");
        let rendered = match format.as_str() {
            "fixed" => format!("{value:.6}"),
            "scientific" => format!("{value:e}"),
            "hex" => format!("{:x}", value as i32),
            _ => format!("{value}"),
        };
        Ok(vec![Value::string(rendered)])
    }
}
