//! In-process repository backed by a project snapshot.
//!
//! The "remote" is a fully loaded working copy; checking out clones its
//! structure without bodies. Commits replace the remote wholesale, so a
//! failed commit leaves it untouched.

use log::{debug, info};

use super::{ModelRepository, Revision};
use crate::error::GenError;
use crate::model::{DocumentId, ProjectSnapshot, WorkingCopy};

#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    remote: WorkingCopy,
    working: WorkingCopy,
    revision: u64,
    commits: Vec<Revision>,
    loads: usize,
    fail_loads: bool,
    fail_commits: bool,
}

impl InMemoryRepository {
    pub fn new(snapshot: ProjectSnapshot) -> Self {
        let remote = WorkingCopy::from_snapshot(snapshot);
        let mut working = remote.clone();
        working.unload_all();
        InMemoryRepository {
            remote,
            working,
            revision: 0,
            commits: Vec::new(),
            loads: 0,
            fail_loads: false,
            fail_commits: false,
        }
    }

    /// Parse a JSON snapshot and check it out.
    pub fn from_json(json: &str) -> Result<Self, GenError> {
        Ok(Self::new(crate::model::parse(json)?))
    }

    /// Discard local changes and check out the latest revision again.
    pub fn checkout(&mut self) {
        self.working = self.remote.clone();
        self.working.unload_all();
    }

    /// The state as of the last successful commit.
    pub fn remote(&self) -> &WorkingCopy {
        &self.remote
    }

    pub fn commits(&self) -> &[Revision] {
        &self.commits
    }

    /// Number of documents materialized so far.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    pub fn fail_loads(&mut self, fail: bool) {
        self.fail_loads = fail;
    }

    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    /// Working copy with unloaded bodies filled in from the remote.
    fn merged(&self) -> Result<WorkingCopy, GenError> {
        let mut merged = self.working.clone();
        for index in 0..self.remote.document_count() {
            let id = DocumentId(index);
            if !merged.is_loaded(id) {
                merged.set_body(id, self.remote.body(id)?.clone())?;
            }
        }
        Ok(merged)
    }
}

#[async_trait::async_trait]
impl ModelRepository for InMemoryRepository {
    fn working_copy(&self) -> &WorkingCopy {
        &self.working
    }

    fn working_copy_mut(&mut self) -> &mut WorkingCopy {
        &mut self.working
    }

    async fn load(&mut self, id: DocumentId) -> Result<(), GenError> {
        if self.working.is_loaded(id) {
            return Ok(());
        }
        if self.fail_loads {
            return Err(GenError::repository(format!("load of document #{} failed", id.0)));
        }
        let body = self.remote.body(id)?.clone();
        debug!(document = body.name(), kind = body.kind().to_string(); "Loaded document");
        self.working.set_body(id, body)?;
        self.loads += 1;
        Ok(())
    }

    async fn commit(&mut self, branch: Option<&str>) -> Result<Revision, GenError> {
        if self.fail_commits {
            return Err(GenError::repository("commit rejected"));
        }
        let merged = self.merged()?;
        self.remote = merged;
        self.revision += 1;
        let revision = Revision {
            number: self.revision,
            branch: branch.map(String::from),
        };
        info!(revision = revision.number, branch = branch.unwrap_or("(default)"); "Committed working copy");
        self.commits.push(revision.clone());
        Ok(revision)
    }
}
