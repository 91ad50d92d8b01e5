//! Open-with-log microflows for every page of the project.

use log::{debug, info};

use super::report::RunReport;
use super::{ensure_absent, ensure_folder, insert_microflow};
use crate::build::build_page_logging_microflow;
use crate::config::PageLoggingSettings;
use crate::error::GenError;
use crate::model::{ContainerId, DocumentKind, WorkingCopy, page_parameter_entity};

struct Target {
    page: String,
    module_name: String,
    parameter_entity: Option<String>,
}

/// Create `ACT_<Page>_OpenWithLog` in the logging module for every page.
///
/// Pages and domain models must be loaded. The logging module, both Java
/// actions, every page parameter and its entity are checked before the
/// first microflow is created: an ambiguous page fails the whole run with
/// nothing created.
pub fn generate_page_logging(
    wc: &mut WorkingCopy,
    settings: &PageLoggingSettings,
    report: &mut RunReport,
) -> Result<(), GenError> {
    let logging_module = wc
        .module_by_name(&settings.logging_module)
        .ok_or_else(|| GenError::missing(format!("logging module '{}'", settings.logging_module)))?;
    for action in [&settings.ip_address_action, &settings.browser_type_action] {
        wc.find_by_qualified_name(DocumentKind::JavaAction, action)
            .ok_or_else(|| GenError::missing(format!("Java action '{action}'")))?;
    }

    let targets = resolve_targets(wc)?;
    info!(pages = targets.len(), module = settings.logging_module.as_str(); "Generating page logging microflows");

    for target in targets {
        let name = settings.microflow_name(&target.page);
        let qualified_name = format!("{}.{}", settings.logging_module, name);
        if !ensure_absent(wc, DocumentKind::Microflow, &qualified_name, report) {
            continue;
        }

        let folder = module_folder(wc, logging_module, &target.module_name, settings, report)?;
        let microflow =
            build_page_logging_microflow(&target.page, target.parameter_entity.as_deref(), settings);
        insert_microflow(wc, folder, microflow, report)?;
    }
    Ok(())
}

fn resolve_targets(wc: &WorkingCopy) -> Result<Vec<Target>, GenError> {
    let mut targets = Vec::new();
    for id in wc.documents_of_kind(DocumentKind::Page) {
        let page = wc.qualified_name(id)?;
        let parameter_entity = page_parameter_entity(wc.page(id)?, &page)?;
        if let Some(entity) = &parameter_entity {
            if wc.find_entity(entity).is_none() {
                return Err(GenError::missing(format!(
                    "entity '{entity}' used as parameter of page '{page}'"
                )));
            }
        }
        debug!(page = page.as_str(), parameter = parameter_entity.as_deref().unwrap_or("-"); "Resolved page");
        targets.push(Target {
            module_name: wc.module_name(wc.document(id)?.container)?.to_string(),
            page,
            parameter_entity,
        });
    }
    Ok(targets)
}

/// Folder for the microflows of pages from `module_name`: an existing folder
/// of that name anywhere in the logging module, otherwise
/// `<folder_name>/<module_name>`.
fn module_folder(
    wc: &mut WorkingCopy,
    logging_module: ContainerId,
    module_name: &str,
    settings: &PageLoggingSettings,
    report: &mut RunReport,
) -> Result<ContainerId, GenError> {
    if let Some(folder) = wc.find_folder(logging_module, module_name) {
        return Ok(folder);
    }
    let base = ensure_folder(wc, logging_module, &settings.folder_name, report)?;
    ensure_folder(wc, base, module_name, report)
}
