//! Unified error type for generation runs.
//!
//! Only fatal conditions are errors. Name collisions and unsupported
//! attribute types are recorded in the run report instead.

use thiserror::Error;

use crate::config::ConfigError;
use crate::microflow::ValidationError;

#[derive(Debug, Error)]
pub enum GenError {
    /// A module, Java action or other artifact the run depends on is absent.
    #[error("Missing prerequisite: {what}")]
    MissingPrerequisite { what: String },

    #[error("Page '{page}' references more than one parameter entity: {}", .entities.join(", "))]
    AmbiguousPageParameter { page: String, entities: Vec<String> },

    /// A document was accessed before it was loaded from the repository.
    #[error("Document '{document}' has not been loaded")]
    NotLoaded { document: String },

    #[error("Unknown container #{0}")]
    UnknownContainer(usize),

    #[error("Unknown document #{0}")]
    UnknownDocument(usize),

    #[error("Generated microflow '{microflow}' is structurally invalid: {}", format_errors(.errors))]
    InvalidGraph {
        microflow: String,
        errors: Vec<ValidationError>,
    },

    #[error("Repository failure: {0}")]
    Repository(String),

    #[error("Failed to parse project snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl GenError {
    pub fn missing(what: impl Into<String>) -> Self {
        GenError::MissingPrerequisite { what: what.into() }
    }

    pub fn repository(message: impl Into<String>) -> Self {
        GenError::Repository(message.into())
    }

    /// Stable code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            GenError::MissingPrerequisite { .. } => "G001",
            GenError::AmbiguousPageParameter { .. } => "G002",
            GenError::NotLoaded { .. } => "G003",
            GenError::UnknownContainer(_) => "G004",
            GenError::UnknownDocument(_) => "G005",
            GenError::InvalidGraph { .. } => "G006",
            GenError::Repository(_) => "G007",
            GenError::Snapshot(_) => "G008",
            GenError::Config(_) => "G009",
        }
    }
}
