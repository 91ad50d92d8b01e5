//! Project model: snapshot parsing and the mutable working copy.

pub mod page;
pub mod types;
pub mod working_copy;

pub use page::page_parameter_entity;
pub use types::*;
pub use working_copy::{Container, ContainerId, ContainerKind, Document, DocumentId, WorkingCopy};

use crate::error::GenError;

/// Deserialize a project snapshot JSON string.
pub fn parse(json: &str) -> Result<ProjectSnapshot, GenError> {
    Ok(serde_json::from_str::<ProjectSnapshot>(json)?)
}

/// Parse a snapshot and build a fully loaded working copy in one step.
pub fn parse_working_copy(json: &str) -> Result<WorkingCopy, GenError> {
    Ok(WorkingCopy::from_snapshot(parse(json)?))
}
