//! Plan documents: external graph descriptions replayed onto the builder.
//!
//! A plan is not a graph — it is a description a front-end hands over, which
//! this module replays through the ordinary builder operations. Two formats
//! are supported: a line-oriented textual form (v0) and a JSON document
//! (v1). Builder errors propagate unchanged; shape problems in the document
//! itself are reported as plan errors.

use crate::error::{Result, TrellisError};
use crate::graph::Graph;
use crate::types::NodeId;
use crate::value::Value;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Supported JSON plan document version.
pub const PLAN_VERSION: u32 = 1;

/// A parsed plan, ready to replay onto a graph.
#[derive(Debug, Deserialize)]
pub struct PlanDocument {
    /// Document version; must equal [`PLAN_VERSION`].
    pub version: u32,
    /// Node declarations.
    #[serde(default)]
    pub nodes: Vec<PlanNode>,
    /// Edge declarations.
    #[serde(default)]
    pub edges: PlanEdges,
    /// Output pin declarations.
    #[serde(default)]
    pub outputs: Vec<PlanOutput>,
}

/// A node declaration.
#[derive(Debug, Deserialize)]
pub struct PlanNode {
    /// Caller-chosen node id.
    pub id: i32,
    /// Registered type name.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Parameters; values must be JSON numbers, strings, or booleans.
    #[serde(default)]
    pub params: serde_json::Map<String, JsonValue>,
}

/// The edge sets of a plan.
#[derive(Debug, Default, Deserialize)]
pub struct PlanEdges {
    /// Data edges.
    #[serde(default)]
    pub data: Vec<PlanEdge>,
    /// Reserved; control is derived by the engine, never declared.
    #[serde(default)]
    pub control: Vec<JsonValue>,
}

/// A data edge declaration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEdge {
    /// Source node id.
    pub from: i32,
    /// Source output index.
    pub from_output: usize,
    /// Target node id.
    pub to: i32,
    /// Target input index.
    pub to_input: usize,
}

/// An output pin declaration.
#[derive(Debug, Deserialize)]
pub struct PlanOutput {
    /// Producing node id.
    pub node: i32,
    /// Output index on that node.
    pub output: usize,
}

impl PlanDocument {
    /// Parse the JSON v1 format. Unknown top-level keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json).map_err(|e| TrellisError::InvalidPlan {
            cause: e.to_string(),
        })?;
        if doc.version != PLAN_VERSION {
            return Err(TrellisError::InvalidPlan {
                cause: format!("unsupported version {}", doc.version),
            });
        }
        Ok(doc)
    }

    /// Parse the line-oriented textual v0 format.
    ///
    /// Recognized heads: `NODES <n>` (ignored), `NODE <id> <type>
    /// [key=value ...]`, `CONNECTION <from> <fromOut> <to> <toIn>`,
    /// `OUTPUT <id> <outIdx>`. Lines with any other head are ignored;
    /// malformed arguments on a recognized head are an error. Values parse
    /// as numbers when numeric, else as strings.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut data = Vec::new();
        let mut outputs = Vec::new();

        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("NODE") => {
                    let id = parse_field(tokens.next(), line, "node id")?;
                    let node_type: String = parse_field(tokens.next(), line, "node type")?;
                    let mut params = serde_json::Map::new();
                    for token in tokens {
                        let Some((key, raw)) = token.split_once('=') else {
                            return Err(invalid(line, "parameter must be key=value"));
                        };
                        params.insert(key.to_string(), text_param_value(raw));
                    }
                    nodes.push(PlanNode {
                        id,
                        node_type,
                        params,
                    });
                }
                Some("CONNECTION") => {
                    data.push(PlanEdge {
                        from: parse_field(tokens.next(), line, "source id")?,
                        from_output: parse_field(tokens.next(), line, "source output")?,
                        to: parse_field(tokens.next(), line, "target id")?,
                        to_input: parse_field(tokens.next(), line, "target input")?,
                    });
                }
                Some("OUTPUT") => {
                    outputs.push(PlanOutput {
                        node: parse_field(tokens.next(), line, "node id")?,
                        output: parse_field(tokens.next(), line, "output index")?,
                    });
                }
                // The node-count header carries no information we need, and
                // lines with any other head are ignored.
                _ => {}
            }
        }

        Ok(Self {
            version: PLAN_VERSION,
            nodes,
            edges: PlanEdges {
                data,
                control: Vec::new(),
            },
            outputs,
        })
    }

    /// Replay this plan onto `graph` through the builder operations.
    pub fn apply(&self, graph: &mut Graph) -> Result<()> {
        for node in &self.nodes {
            let id = NodeId::new(node.id);
            graph.add_node(id, &node.node_type, None)?;
            for (key, value) in &node.params {
                graph.set_param(id, key, plan_param_value(key, value)?)?;
            }
        }
        for edge in &self.edges.data {
            graph.connect(
                NodeId::new(edge.from),
                edge.from_output,
                NodeId::new(edge.to),
                edge.to_input,
            )?;
        }
        for output in &self.outputs {
            graph.add_output(NodeId::new(output.node), output.output)?;
        }
        Ok(())
    }
}

fn invalid(line: &str, cause: &str) -> TrellisError {
    TrellisError::InvalidPlan {
        cause: format!("{cause} in line '{line}'"),
    }
}

fn parse_field<T: std::str::FromStr>(
    token: Option<&str>,
    line: &str,
    what: &str,
) -> Result<T> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| invalid(line, &format!("missing or malformed {what}")))
}

fn text_param_value(raw: &str) -> JsonValue {
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| JsonValue::String(raw.to_string()), JsonValue::Number)
}

fn plan_param_value(key: &str, value: &JsonValue) -> Result<Value> {
    match value {
        JsonValue::Number(n) => {
            n.as_f64()
                .map(Value::number)
                .ok_or_else(|| TrellisError::InvalidPlan {
                    cause: format!("parameter '{key}' is not a representable number"),
                })
        }
        JsonValue::String(s) => Ok(Value::string(s.clone())),
        JsonValue::Bool(b) => Ok(Value::bool(*b)),
        _ => Err(TrellisError::InvalidPlan {
            cause: format!("parameter '{key}' must be a number, string, or bool"),
        }),
    }
}
