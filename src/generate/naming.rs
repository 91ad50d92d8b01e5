//! Microflow naming audit. Read-only.

use log::{info, warn};

use super::report::RunReport;
use crate::config::NamingSettings;
use crate::error::GenError;
use crate::model::{DocumentKind, WorkingCopy};

/// Record every microflow of the audited modules whose name starts with none
/// of the allowed prefixes. Only document names are read, so nothing needs
/// to be loaded.
pub fn audit_naming(
    wc: &WorkingCopy,
    settings: &NamingSettings,
    report: &mut RunReport,
) -> Result<(), GenError> {
    for id in wc.documents_of_kind(DocumentKind::Microflow) {
        let document = wc.document(id)?;
        let module = wc.module_name(document.container)?;
        if !settings.modules.iter().any(|m| m == module) {
            continue;
        }
        if settings.prefixes.iter().any(|p| document.name.starts_with(p.as_str())) {
            continue;
        }
        let qualified_name = wc.qualified_name(id)?;
        warn!(microflow = qualified_name.as_str(); "Microflow name has no allowed prefix");
        report.naming_violations.push(qualified_name);
    }
    info!(violations = report.naming_violations.len(); "Naming audit done");
    Ok(())
}
