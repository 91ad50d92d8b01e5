//! Validation microflows for the entities of the configured modules.

use log::info;

use super::report::{RunReport, SkipReason};
use super::{ensure_absent, ensure_folder, insert_microflow};
use crate::build::build_validation_microflow;
use crate::config::ValidationSettings;
use crate::error::GenError;
use crate::model::{ContainerId, DocumentKind, Entity, WorkingCopy};

struct Target {
    module: ContainerId,
    module_name: String,
    entity: Entity,
}

/// Create `VAL_<Entity>` for every selected entity that does not have one yet.
///
/// The domain models of the configured modules must be loaded. All modules
/// are resolved before anything is created, so a missing module leaves the
/// working copy untouched.
pub fn generate_validation(
    wc: &mut WorkingCopy,
    settings: &ValidationSettings,
    report: &mut RunReport,
) -> Result<(), GenError> {
    let targets = resolve_targets(wc, settings)?;
    info!(entities = targets.len(); "Generating validation microflows");

    for target in targets {
        let name = format!("{}{}", settings.microflow_prefix, target.entity.name);
        let qualified_name = format!("{}.{}", target.module_name, name);
        if !ensure_absent(wc, DocumentKind::Microflow, &qualified_name, report) {
            continue;
        }

        let (microflow, skipped) =
            build_validation_microflow(&target.entity, &target.module_name, settings);
        for attribute in skipped {
            report.skip(
                format!(
                    "{}.{}.{}",
                    target.module_name, target.entity.name, attribute.attribute
                ),
                SkipReason::UnsupportedAttributeType {
                    attribute_type: attribute.attribute_type,
                },
            );
        }

        let folder = ensure_folder(wc, target.module, &settings.folder_name, report)?;
        insert_microflow(wc, folder, microflow, report)?;
    }
    Ok(())
}

fn resolve_targets(wc: &WorkingCopy, settings: &ValidationSettings) -> Result<Vec<Target>, GenError> {
    let mut targets = Vec::new();
    for selection in &settings.modules {
        let module = wc
            .module_by_name(&selection.name)
            .ok_or_else(|| GenError::missing(format!("module '{}'", selection.name)))?;
        let domain_model = wc
            .domain_model_document(module)
            .ok_or_else(|| GenError::missing(format!("domain model of module '{}'", selection.name)))?;
        for entity in &wc.domain_model(domain_model)?.entities {
            if selection.selects(&entity.name) {
                targets.push(Target {
                    module,
                    module_name: selection.name.clone(),
                    entity: entity.clone(),
                });
            }
        }
    }
    Ok(targets)
}
