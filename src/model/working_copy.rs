//! The working copy: a mutable, checked-out view of the project model.
//!
//! Containers (modules and folders) form a strict tree rooted at modules.
//! Documents live in exactly one container. A document's body is `None`
//! until the repository loads it; reading an unloaded body is an error.

use serde::Serialize;

use super::types::*;
use crate::error::GenError;
use crate::microflow::Microflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContainerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocumentId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Module,
    Folder,
}

#[derive(Debug, Clone)]
pub struct Container {
    pub name: String,
    pub kind: ContainerKind,
    /// `None` exactly for modules.
    pub parent: Option<ContainerId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub container: ContainerId,
    pub body: Option<DocumentBody>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkingCopy {
    containers: Vec<Container>,
    documents: Vec<Document>,
}

impl WorkingCopy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully loaded working copy from a snapshot.
    pub fn from_snapshot(snapshot: ProjectSnapshot) -> Self {
        let mut wc = WorkingCopy::new();
        for module in snapshot.modules {
            let module_id = wc.push_container(module.name, ContainerKind::Module, None);
            wc.push_document(
                module_id,
                DocumentBody::DomainModel(module.domain_model),
            );
            wc.insert_contents(module_id, module.folders, module.documents);
        }
        wc
    }

    fn insert_contents(
        &mut self,
        container: ContainerId,
        folders: Vec<FolderSnapshot>,
        documents: Vec<DocumentBody>,
    ) {
        for body in documents {
            self.push_document(container, body);
        }
        for folder in folders {
            let folder_id = self.push_container(folder.name, ContainerKind::Folder, Some(container));
            self.insert_contents(folder_id, folder.folders, folder.documents);
        }
    }

    /// Convert back into a snapshot. Every document must be loaded.
    pub fn to_snapshot(&self) -> Result<ProjectSnapshot, GenError> {
        let mut modules = Vec::new();
        for (module_id, module) in self.modules() {
            let domain_model = self
                .domain_model_document(module_id)
                .map(|id| self.domain_model(id).cloned())
                .transpose()?
                .unwrap_or_default();
            let (folders, documents) = self.snapshot_contents(module_id)?;
            modules.push(ModuleSnapshot {
                name: module.name.clone(),
                domain_model,
                folders,
                documents,
            });
        }
        Ok(ProjectSnapshot { modules })
    }

    fn snapshot_contents(
        &self,
        container: ContainerId,
    ) -> Result<(Vec<FolderSnapshot>, Vec<DocumentBody>), GenError> {
        let mut documents = Vec::new();
        for id in self.documents_in(container) {
            if self.documents[id.0].kind == DocumentKind::DomainModel {
                continue;
            }
            documents.push(self.body(id)?.clone());
        }
        let mut folders = Vec::new();
        for folder_id in self.child_folders(container) {
            let (sub_folders, sub_documents) = self.snapshot_contents(folder_id)?;
            folders.push(FolderSnapshot {
                name: self.containers[folder_id.0].name.clone(),
                folders: sub_folders,
                documents: sub_documents,
            });
        }
        Ok((folders, documents))
    }

    fn push_container(
        &mut self,
        name: String,
        kind: ContainerKind,
        parent: Option<ContainerId>,
    ) -> ContainerId {
        let id = ContainerId(self.containers.len());
        self.containers.push(Container { name, kind, parent });
        id
    }

    fn push_document(&mut self, container: ContainerId, body: DocumentBody) -> DocumentId {
        let id = DocumentId(self.documents.len());
        self.documents.push(Document {
            name: body.name().to_string(),
            kind: body.kind(),
            container,
            body: Some(body),
        });
        id
    }

    // -------------------------------------------------------------------------
    // Loading state
    // -------------------------------------------------------------------------

    /// Drop every document body, leaving only the structure (names, kinds,
    /// containers) as a freshly checked-out working copy would have.
    pub fn unload_all(&mut self) {
        for document in &mut self.documents {
            document.body = None;
        }
    }

    pub fn is_loaded(&self, id: DocumentId) -> bool {
        self.documents
            .get(id.0)
            .map(|d| d.body.is_some())
            .unwrap_or(false)
    }

    /// Install a materialized body for an existing document.
    pub fn set_body(&mut self, id: DocumentId, body: DocumentBody) -> Result<(), GenError> {
        let document = self
            .documents
            .get_mut(id.0)
            .ok_or(GenError::UnknownDocument(id.0))?;
        document.name = body.name().to_string();
        document.body = Some(body);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Containers
    // -------------------------------------------------------------------------

    pub fn container(&self, id: ContainerId) -> Result<&Container, GenError> {
        self.containers
            .get(id.0)
            .ok_or(GenError::UnknownContainer(id.0))
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn modules(&self) -> impl Iterator<Item = (ContainerId, &Container)> {
        self.containers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ContainerKind::Module)
            .map(|(i, c)| (ContainerId(i), c))
    }

    pub fn module_by_name(&self, name: &str) -> Option<ContainerId> {
        self.modules()
            .find(|(_, m)| m.name == name)
            .map(|(id, _)| id)
    }

    /// Resolve the module a container belongs to by walking up the tree.
    /// Terminates because the tree is finite and rooted at modules.
    pub fn containing_module(&self, id: ContainerId) -> Result<ContainerId, GenError> {
        let container = self.container(id)?;
        match (container.kind, container.parent) {
            (ContainerKind::Module, _) => Ok(id),
            (ContainerKind::Folder, Some(parent)) => self.containing_module(parent),
            (ContainerKind::Folder, None) => Err(GenError::UnknownContainer(id.0)),
        }
    }

    pub fn module_name(&self, id: ContainerId) -> Result<&str, GenError> {
        let module = self.containing_module(id)?;
        Ok(self.containers[module.0].name.as_str())
    }

    pub fn child_folders(&self, parent: ContainerId) -> Vec<ContainerId> {
        self.containers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ContainerKind::Folder && c.parent == Some(parent))
            .map(|(i, _)| ContainerId(i))
            .collect()
    }

    /// Direct child folder with the given name.
    pub fn child_folder(&self, parent: ContainerId, name: &str) -> Option<ContainerId> {
        self.child_folders(parent)
            .into_iter()
            .find(|id| self.containers[id.0].name == name)
    }

    /// First folder with the given name anywhere below `root`, depth first.
    pub fn find_folder(&self, root: ContainerId, name: &str) -> Option<ContainerId> {
        for child in self.child_folders(root) {
            if self.containers[child.0].name == name {
                return Some(child);
            }
            if let Some(found) = self.find_folder(child, name) {
                return Some(found);
            }
        }
        None
    }

    pub fn create_folder(&mut self, parent: ContainerId, name: &str) -> Result<ContainerId, GenError> {
        self.container(parent)?;
        Ok(self.push_container(name.to_string(), ContainerKind::Folder, Some(parent)))
    }

    /// Return the named child folder, creating it when absent. The flag tells
    /// whether a folder was created.
    pub fn ensure_folder(
        &mut self,
        parent: ContainerId,
        name: &str,
    ) -> Result<(ContainerId, bool), GenError> {
        match self.child_folder(parent, name) {
            Some(id) => Ok((id, false)),
            None => Ok((self.create_folder(parent, name)?, true)),
        }
    }

    // -------------------------------------------------------------------------
    // Documents
    // -------------------------------------------------------------------------

    pub fn document(&self, id: DocumentId) -> Result<&Document, GenError> {
        self.documents
            .get(id.0)
            .ok_or(GenError::UnknownDocument(id.0))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn documents_in(&self, container: ContainerId) -> Vec<DocumentId> {
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, d)| d.container == container)
            .map(|(i, _)| DocumentId(i))
            .collect()
    }

    pub fn documents_of_kind(&self, kind: DocumentKind) -> Vec<DocumentId> {
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind == kind)
            .map(|(i, _)| DocumentId(i))
            .collect()
    }

    /// `Module.Name` of a document, independent of the folders in between.
    pub fn qualified_name(&self, id: DocumentId) -> Result<String, GenError> {
        let document = self.document(id)?;
        Ok(format!(
            "{}.{}",
            self.module_name(document.container)?,
            document.name
        ))
    }

    /// Look a document up by kind and `Module.Name`.
    pub fn find_by_qualified_name(&self, kind: DocumentKind, qualified_name: &str) -> Option<DocumentId> {
        let (module_name, name) = qualified_name.split_once('.')?;
        let module = self.module_by_name(module_name)?;
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind == kind && d.name == name)
            .map(|(i, _)| DocumentId(i))
            .find(|id| {
                self.containing_module(self.documents[id.0].container)
                    .map(|m| m == module)
                    .unwrap_or(false)
            })
    }

    /// Add a new, loaded document to `container`.
    pub fn create_in(&mut self, container: ContainerId, body: DocumentBody) -> Result<DocumentId, GenError> {
        self.container(container)?;
        Ok(self.push_document(container, body))
    }

    pub fn body(&self, id: DocumentId) -> Result<&DocumentBody, GenError> {
        let document = self.document(id)?;
        document.body.as_ref().ok_or_else(|| GenError::NotLoaded {
            document: document.name.clone(),
        })
    }

    fn body_mut(&mut self, id: DocumentId) -> Result<&mut DocumentBody, GenError> {
        let document = self
            .documents
            .get_mut(id.0)
            .ok_or(GenError::UnknownDocument(id.0))?;
        let name = document.name.clone();
        document
            .body
            .as_mut()
            .ok_or(GenError::NotLoaded { document: name })
    }

    pub fn domain_model_document(&self, module: ContainerId) -> Option<DocumentId> {
        self.documents_in(module)
            .into_iter()
            .find(|id| self.documents[id.0].kind == DocumentKind::DomainModel)
    }

    pub fn domain_model(&self, id: DocumentId) -> Result<&DomainModel, GenError> {
        match self.body(id)? {
            DocumentBody::DomainModel(dm) => Ok(dm),
            _ => Err(GenError::UnknownDocument(id.0)),
        }
    }

    pub fn page(&self, id: DocumentId) -> Result<&Page, GenError> {
        match self.body(id)? {
            DocumentBody::Page(page) => Ok(page),
            _ => Err(GenError::UnknownDocument(id.0)),
        }
    }

    pub fn microflow(&self, id: DocumentId) -> Result<&Microflow, GenError> {
        match self.body(id)? {
            DocumentBody::Microflow(mf) => Ok(mf),
            _ => Err(GenError::UnknownDocument(id.0)),
        }
    }

    pub fn microflow_mut(&mut self, id: DocumentId) -> Result<&mut Microflow, GenError> {
        match self.body_mut(id)? {
            DocumentBody::Microflow(mf) => Ok(mf),
            _ => Err(GenError::UnknownDocument(id.0)),
        }
    }

    /// Resolve `Module.Entity` against the loaded domain models.
    pub fn find_entity(&self, qualified_name: &str) -> Option<&Entity> {
        let (module_name, entity_name) = qualified_name.split_once('.')?;
        let module = self.module_by_name(module_name)?;
        let dm = self.domain_model_document(module)?;
        self.domain_model(dm).ok()?.entity(entity_name)
    }
}
