//! Country-metric lookups exposed as agent tools.
//!
//! Every operation returns an [`Outcome`]: store faults become
//! `{"status":"error","error_message":...}` rather than propagating, so the
//! orchestrating runtime can relay results without handling errors itself.

mod catalog;
mod dispatch;
mod ops;

pub use catalog::{catalog, Tool, ToolSpec, Toolset};
pub use dispatch::{invoke, DispatchError};
pub use insights_core::Outcome;
pub use ops::*;
