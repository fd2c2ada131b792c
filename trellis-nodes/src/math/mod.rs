//! Numeric nodes.

mod add;
mod clamp;
mod multiply;

pub use add::AddNode;
pub use clamp::ClampNode;
pub use multiply::MultiplyNode;
