//! Generation runs over a working copy.
//!
//! The synchronous generators in this module assume every document they read
//! is already loaded; [`run`] wraps them with repository loading and the
//! final commit.

pub mod guard;
pub mod naming;
pub mod page_logging;
pub mod recolor;
pub mod report;
pub mod run;
pub mod validation;

pub use guard::ensure_absent;
pub use naming::audit_naming;
pub use page_logging::generate_page_logging;
pub use recolor::recolor_microflows;
pub use report::{RunKind, RunReport, Skip, SkipReason};
pub use run::{run_naming_audit, run_page_logging, run_recolor, run_validation};
pub use validation::generate_validation;

use log::info;

use crate::error::GenError;
use crate::microflow::{Microflow, validate_microflow};
use crate::model::{ContainerId, DocumentBody, DocumentId, WorkingCopy};

/// Check `microflow` against the structural invariants and add it to
/// `container`.
fn insert_microflow(
    wc: &mut WorkingCopy,
    container: ContainerId,
    microflow: Microflow,
    report: &mut RunReport,
) -> Result<DocumentId, GenError> {
    let errors = validate_microflow(&microflow);
    if !errors.is_empty() {
        return Err(GenError::InvalidGraph {
            microflow: microflow.name.clone(),
            errors,
        });
    }

    let objects = microflow.objects.len();
    let id = wc.create_in(container, DocumentBody::Microflow(microflow))?;
    let qualified_name = wc.qualified_name(id)?;
    info!(microflow = qualified_name.as_str(), objects = objects; "Created microflow");
    report.created_microflows.push(qualified_name);
    report.created_objects += objects;
    Ok(id)
}

/// Child folder `name` of `parent`, created and reported when absent.
fn ensure_folder(
    wc: &mut WorkingCopy,
    parent: ContainerId,
    name: &str,
    report: &mut RunReport,
) -> Result<ContainerId, GenError> {
    let (id, created) = wc.ensure_folder(parent, name)?;
    if created {
        let path = folder_path(wc, id)?;
        info!(folder = path.as_str(); "Created folder");
        report.created_folders.push(path);
    }
    Ok(id)
}

/// `Module/Folder/Sub` path of a container.
fn folder_path(wc: &WorkingCopy, id: ContainerId) -> Result<String, GenError> {
    let container = wc.container(id)?;
    match container.parent {
        Some(parent) => Ok(format!("{}/{}", folder_path(wc, parent)?, container.name)),
        None => Ok(container.name.clone()),
    }
}
