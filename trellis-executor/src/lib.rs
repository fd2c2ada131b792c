//! Trellis Executor
//!
//! Runs a committed graph: the schedule analyzer derives per-node indegrees,
//! the port-indexed input map, and the control edges, and proves the edge
//! set acyclic; the executor then launches one task per node onto a
//! work-stealing pool, honoring data precedence, gating conditional
//! branches, and propagating the first failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod executor;
pub mod schedule;

pub use executor::{Executor, ExecutorConfig};
pub use schedule::{Schedule, SlotBinding};
