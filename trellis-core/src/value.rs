//! Tagged values flowing through graph edges.
//!
//! Every value carries its tag explicitly; readers check the tag through the
//! typed accessors. Tag equality is the only coercion rule — conversion
//! between types is the job of explicit node types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag for values, ports, and parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// 64-bit IEEE-754 float.
    Number,
    /// UTF-8 text of arbitrary length.
    String,
    /// Boolean.
    Bool,
}

impl ValueType {
    /// The wire name of this tag ("number", "string", "bool").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }

    /// The seed value slots of this type start out with.
    #[must_use]
    pub fn seed(self) -> Value {
        match self {
            Self::Number => Value::Number(0.0),
            Self::String => Value::String(String::new()),
            Self::Bool => Value::Bool(false),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged value: 64-bit float, UTF-8 text, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A 64-bit IEEE-754 float.
    Number(f64),
    /// UTF-8 text.
    String(String),
    /// A boolean.
    Bool(bool),
}

impl Value {
    /// Create a number value.
    #[must_use]
    pub fn number(v: f64) -> Self {
        Self::Number(v)
    }

    /// Create a string value.
    #[must_use]
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Create a boolean value.
    #[must_use]
    pub fn bool(v: bool) -> Self {
        Self::Bool(v)
    }

    /// The tag this value carries.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
        }
    }

    /// Read as a number; `None` if the tag differs.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Read as a string slice; `None` if the tag differs.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Read as a boolean; `None` if the tag differs.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
