//! The external model repository the generators run against.
//!
//! A repository hands out a working copy whose documents start unloaded.
//! Loading and committing are the only suspension points of a run.

pub mod memory;

pub use memory::InMemoryRepository;

use serde::Serialize;

use crate::error::GenError;
use crate::model::{DocumentId, DocumentKind, WorkingCopy};

/// A committed revision of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub number: u64,
    /// `None` for the default branch.
    pub branch: Option<String>,
}

#[async_trait::async_trait]
pub trait ModelRepository: Send {
    fn working_copy(&self) -> &WorkingCopy;

    fn working_copy_mut(&mut self) -> &mut WorkingCopy;

    /// Materialize the body of a document in the working copy. Loading an
    /// already loaded document is a no-op.
    async fn load(&mut self, id: DocumentId) -> Result<(), GenError>;

    /// Persist every mutation of the working copy. Either all of it lands
    /// or none of it does.
    async fn commit(&mut self, branch: Option<&str>) -> Result<Revision, GenError>;
}

/// Load every document of `kind`, optionally restricted to some modules.
pub async fn load_all<R>(repo: &mut R, kind: DocumentKind, modules: &[String]) -> Result<usize, GenError>
where
    R: ModelRepository + ?Sized,
{
    let wc = repo.working_copy();
    let mut pending = Vec::new();
    for id in wc.documents_of_kind(kind) {
        if wc.is_loaded(id) {
            continue;
        }
        if !modules.is_empty() {
            let module = wc.module_name(wc.document(id)?.container)?;
            if !modules.iter().any(|m| m == module) {
                continue;
            }
        }
        pending.push(id);
    }

    for id in &pending {
        repo.load(*id).await?;
    }
    Ok(pending.len())
}
