//! Read-only shape of the project model: modules, folders, domain models,
//! pages and Java actions, plus the JSON snapshot they are loaded from.
//!
//! Microflow documents reuse the graph types from [`crate::microflow`].

use serde::{Deserialize, Serialize};

use crate::microflow::Microflow;

// =============================================================================
// SNAPSHOT (serde target)
// =============================================================================

/// A whole project as stored in a snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub modules: Vec<ModuleSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub name: String,
    #[serde(default)]
    pub domain_model: DomainModel,
    #[serde(default)]
    pub folders: Vec<FolderSnapshot>,
    #[serde(default)]
    pub documents: Vec<DocumentBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSnapshot {
    pub name: String,
    #[serde(default)]
    pub folders: Vec<FolderSnapshot>,
    #[serde(default)]
    pub documents: Vec<DocumentBody>,
}

// =============================================================================
// DOCUMENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    DomainModel,
    Microflow,
    Page,
    JavaAction,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::DomainModel => write!(f, "domain model"),
            DocumentKind::Microflow => write!(f, "microflow"),
            DocumentKind::Page => write!(f, "page"),
            DocumentKind::JavaAction => write!(f, "Java action"),
        }
    }
}

/// Fully materialized content of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DocumentBody {
    DomainModel(DomainModel),
    Microflow(Microflow),
    Page(Page),
    JavaAction(JavaAction),
}

impl DocumentBody {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentBody::DomainModel(_) => DocumentKind::DomainModel,
            DocumentBody::Microflow(_) => DocumentKind::Microflow,
            DocumentBody::Page(_) => DocumentKind::Page,
            DocumentBody::JavaAction(_) => DocumentKind::JavaAction,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DocumentBody::DomainModel(_) => DomainModel::DOCUMENT_NAME,
            DocumentBody::Microflow(mf) => &mf.name,
            DocumentBody::Page(page) => &page.name,
            DocumentBody::JavaAction(action) => &action.name,
        }
    }
}

// =============================================================================
// DOMAIN MODEL
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainModel {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl DomainModel {
    /// Every module has exactly one domain model, stored under this name.
    pub const DOCUMENT_NAME: &'static str = "DomainModel";

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    /// Declaration order is significant: validation chains follow it.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

/// Declared type of an entity attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttributeType {
    AutoNumber,
    Binary,
    Boolean,
    Currency,
    DateTime,
    Decimal,
    Enumeration { enumeration: String },
    Float,
    HashString,
    Integer,
    Long,
    String {
        #[serde(default)]
        length: Option<u32>,
    },
}

impl AttributeType {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeType::AutoNumber => "AutoNumber",
            AttributeType::Binary => "Binary",
            AttributeType::Boolean => "Boolean",
            AttributeType::Currency => "Currency",
            AttributeType::DateTime => "DateTime",
            AttributeType::Decimal => "Decimal",
            AttributeType::Enumeration { .. } => "Enumeration",
            AttributeType::Float => "Float",
            AttributeType::HashString => "HashString",
            AttributeType::Integer => "Integer",
            AttributeType::Long => "Long",
            AttributeType::String { .. } => "String",
        }
    }
}

// =============================================================================
// PAGES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    #[serde(default)]
    pub excluded: bool,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// Where a data widget gets its object(s) from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DataSource {
    /// Object passed to the page, identified by its entity (qualified name).
    DirectEntity { entity: String },
    /// Objects retrieved from the database.
    Database { entity: String },
    Microflow { microflow: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Widget {
    DataView {
        source: DataSource,
        #[serde(default)]
        children: Vec<Widget>,
    },
    ListView {
        source: DataSource,
        #[serde(default)]
        children: Vec<Widget>,
    },
    Container {
        #[serde(default)]
        children: Vec<Widget>,
    },
    Text {
        #[serde(default)]
        caption: String,
    },
    Button {
        #[serde(default)]
        caption: String,
    },
}

impl Widget {
    pub fn children(&self) -> &[Widget] {
        match self {
            Widget::DataView { children, .. }
            | Widget::ListView { children, .. }
            | Widget::Container { children } => children,
            Widget::Text { .. } | Widget::Button { .. } => &[],
        }
    }
}

// =============================================================================
// JAVA ACTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaAction {
    pub name: String,
    #[serde(default)]
    pub return_type: Option<crate::microflow::DataType>,
}
