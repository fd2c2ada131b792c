//! Node type signatures and the compute contract.
//!
//! A node type is an immutable pairing of a [`Signature`] — the externally
//! visible description of its ports and parameters — with a pure, total
//! compute function. The catalog of node types is fixed when the registry is
//! built; graphs hold shared handles into it.

use crate::value::{Value, ValueType};
use serde::Serialize;
use std::collections::HashMap;

/// Type name of the conditional node.
///
/// Edges leaving a node of this type gate their targets instead of (or in
/// addition to) carrying data; the schedule analyzer derives control edges
/// from them each run.
pub const CONDITIONAL_TYPE_NAME: &str = "If";

/// Specification of a single node parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// The tag the parameter's value must carry.
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Default used when the parameter is unset.
    pub default: Value,
    /// Human description.
    pub description: String,
    /// Allowed string literals; empty unless the parameter is an enumeration.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_options: Vec<String>,
}

impl ParamSpec {
    /// A number parameter.
    pub fn number(name: impl Into<String>, default: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Number,
            default: Value::number(default),
            description: description.into(),
            enum_options: Vec::new(),
        }
    }

    /// A free-form string parameter.
    pub fn string(
        name: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::String,
            default: Value::string(default),
            description: description.into(),
            enum_options: Vec::new(),
        }
    }

    /// A boolean parameter.
    pub fn bool(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Bool,
            default: Value::bool(default),
            description: description.into(),
            enum_options: Vec::new(),
        }
    }

    /// A string parameter restricted to a set of literals.
    ///
    /// The default must be empty or one of the options.
    pub fn string_enum(
        name: impl Into<String>,
        default: impl Into<String>,
        options: &[&str],
        description: impl Into<String>,
    ) -> Self {
        let default = default.into();
        let enum_options: Vec<String> = options.iter().map(|o| (*o).to_string()).collect();
        debug_assert!(!enum_options.is_empty());
        debug_assert!(default.is_empty() || enum_options.iter().any(|o| *o == default));
        Self {
            name: name.into(),
            value_type: ValueType::String,
            default: Value::String(default),
            description: description.into(),
            enum_options,
        }
    }
}

/// The externally visible description of a node type.
///
/// Input and output lists give arity and socket types in port order.
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    /// Unique type name (e.g., "AddNumber").
    pub name: String,
    /// Implementation version.
    pub version: String,
    /// Human description.
    pub description: String,
    /// Input socket types, in port order.
    pub inputs: Vec<ValueType>,
    /// Output socket types, in port order.
    pub outputs: Vec<ValueType>,
    /// Parameter specifications.
    pub params: Vec<ParamSpec>,
}

impl Signature {
    /// Create a signature with no ports and version "1.0.0".
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the input socket types.
    #[must_use]
    pub fn with_inputs(mut self, inputs: Vec<ValueType>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the output socket types.
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<ValueType>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set the parameter specifications.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }
}

/// Per-node parameter table.
///
/// Lookups are tolerant by design: compute functions read only the keys they
/// know, unknown keys are ignored, and a value of the wrong type falls back
/// to the caller's default.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, Value>,
}

impl Params {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Get a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read a number parameter, falling back on absence or tag mismatch.
    #[must_use]
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.values
            .get(key)
            .and_then(Value::as_number)
            .unwrap_or(default)
    }

    /// Read a string parameter, falling back on absence or tag mismatch.
    #[must_use]
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Read a boolean parameter, falling back on absence or tag mismatch.
    #[must_use]
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything a compute function may read: the pulled input vector and the
/// node's parameter table.
#[derive(Debug)]
pub struct ComputeContext<'a> {
    /// Input values, one per declared input socket.
    pub inputs: &'a [Value],
    /// The node's parameters.
    pub params: &'a Params,
}

impl ComputeContext<'_> {
    /// Read input `index` as a number.
    pub fn number(&self, index: usize) -> std::result::Result<f64, String> {
        self.inputs
            .get(index)
            .and_then(Value::as_number)
            .ok_or_else(|| format!("input {index} is not a number"))
    }

    /// Read input `index` as a string slice.
    pub fn string(&self, index: usize) -> std::result::Result<&str, String> {
        self.inputs
            .get(index)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("input {index} is not a string"))
    }

    /// Read input `index` as a boolean.
    pub fn bool(&self, index: usize) -> std::result::Result<bool, String> {
        self.inputs
            .get(index)
            .and_then(Value::as_bool)
            .ok_or_else(|| format!("input {index} is not a bool"))
    }
}

/// Result of a compute function: one value per declared output, in port
/// order and with matching tags, or a failure reason.
pub type ComputeResult = std::result::Result<Vec<Value>, String>;

/// A node type: an immutable signature plus a pure compute function.
///
/// Compute functions must be total, re-entrant, and free of shared mutable
/// state; they never mutate graph structure and never suspend. The executor
/// supplies all concurrency around them.
pub trait NodeType: Send + Sync {
    /// The type's signature.
    fn signature(&self) -> Signature;

    /// Compute the output vector from the context.
    fn compute(&self, ctx: &ComputeContext<'_>) -> ComputeResult;
}
