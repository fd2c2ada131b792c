//! Strongly-typed identifiers for trellis entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a node within a graph.
///
/// Ids are supplied by the caller at `add_node` time and must be unique
/// within their graph. The raw value is a signed 32-bit integer so that it
/// crosses the C boundary unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(i32);

impl NodeId {
    /// Create a node id from a raw value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

// Debug matches Display so ids read the same in error messages and dumps.
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
