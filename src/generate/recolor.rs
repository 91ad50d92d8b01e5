//! Recolor every microflow of the selected modules.

use log::{info, warn};

use super::report::RunReport;
use crate::build::recolor;
use crate::config::RecolorSettings;
use crate::error::GenError;
use crate::model::{DocumentId, DocumentKind, WorkingCopy};

/// Microflows of the given modules; all microflows when `modules` is empty.
pub fn selected_microflows(wc: &WorkingCopy, modules: &[String]) -> Result<Vec<DocumentId>, GenError> {
    let mut selected = Vec::new();
    for id in wc.documents_of_kind(DocumentKind::Microflow) {
        let module = wc.module_name(wc.document(id)?.container)?;
        if modules.is_empty() || modules.iter().any(|m| m == module) {
            selected.push(id);
        }
    }
    Ok(selected)
}

/// Apply the recolor pass to the selected microflows, which must be loaded.
pub fn recolor_microflows(
    wc: &mut WorkingCopy,
    settings: &RecolorSettings,
    report: &mut RunReport,
) -> Result<(), GenError> {
    let microflows = selected_microflows(wc, &settings.modules)?;
    for id in &microflows {
        let changed = recolor(wc.microflow_mut(*id)?);
        if changed > 0 {
            let qualified_name = wc.qualified_name(*id)?;
            info!(microflow = qualified_name.as_str(), changed = changed; "Recolored microflow");
            report.recolored += changed;
        }
    }

    if report.recolored == 0 {
        warn!(microflows = microflows.len(); "No activity needed a new color");
    } else {
        info!(microflows = microflows.len(), changed = report.recolored; "Recolor done");
    }
    Ok(())
}
