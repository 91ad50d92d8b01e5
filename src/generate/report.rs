//! Per-run report: everything a run created, skipped or changed.

use serde::Serialize;

use crate::repository::Revision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunKind {
    Validation,
    PageLogging,
    Recolor,
    NamingAudit,
}

/// Why something was left out. Skips never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason")]
pub enum SkipReason {
    /// An artifact with the same qualified name already exists.
    NameCollision,
    /// The attribute's type has no validity template.
    UnsupportedAttributeType { attribute_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skip {
    /// Qualified name of the artifact or attribute that was skipped.
    pub subject: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub kind: RunKind,
    /// Qualified names of the microflows created, in creation order.
    pub created_microflows: Vec<String>,
    /// `Module/Folder/...` paths of the folders created.
    pub created_folders: Vec<String>,
    /// Objects across all created microflows.
    pub created_objects: usize,
    pub skips: Vec<Skip>,
    /// Activities whose color was corrected.
    pub recolored: usize,
    /// Microflows that break the naming rules, by qualified name.
    pub naming_violations: Vec<String>,
    pub revision: Option<Revision>,
}

impl RunReport {
    pub fn new(kind: RunKind) -> Self {
        RunReport {
            kind,
            created_microflows: Vec::new(),
            created_folders: Vec::new(),
            created_objects: 0,
            skips: Vec::new(),
            recolored: 0,
            naming_violations: Vec::new(),
            revision: None,
        }
    }

    /// Whether the working copy was modified, i.e. whether to commit.
    pub fn has_changes(&self) -> bool {
        !self.created_microflows.is_empty() || !self.created_folders.is_empty() || self.recolored > 0
    }

    pub fn skip(&mut self, subject: impl Into<String>, reason: SkipReason) {
        self.skips.push(Skip {
            subject: subject.into(),
            reason,
        });
    }

    pub fn skipped_artifacts(&self) -> usize {
        self.skips
            .iter()
            .filter(|s| s.reason == SkipReason::NameCollision)
            .count()
    }

    pub fn skipped_attributes(&self) -> usize {
        self.skips
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::UnsupportedAttributeType { .. }))
            .count()
    }
}
