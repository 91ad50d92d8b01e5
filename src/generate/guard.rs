//! Idempotency guard.

use log::warn;

use super::report::{RunReport, SkipReason};
use crate::model::{DocumentKind, WorkingCopy};

/// True when no document of `kind` is named `qualified_name`. A collision is
/// logged and recorded as a skip; the working copy is never touched.
///
/// Only the name is compared. An existing artifact counts as present even if
/// its content differs from what would be generated.
pub fn ensure_absent(
    wc: &WorkingCopy,
    kind: DocumentKind,
    qualified_name: &str,
    report: &mut RunReport,
) -> bool {
    if wc.find_by_qualified_name(kind, qualified_name).is_none() {
        return true;
    }
    warn!(name = qualified_name, kind = kind.to_string(); "Not created, a document with that name already exists");
    report.skip(qualified_name, SkipReason::NameCollision);
    false
}
