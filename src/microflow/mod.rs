//! Microflow graph model, petgraph view and structural validation.

pub mod graph;
pub mod types;
pub mod validate;

pub use graph::FlowGraph;
pub use types::*;
pub use validate::{ValidationError, validate_microflow};
