//! Microflow data model.
//!
//! A microflow is a named directed control-flow graph: an ordered list of
//! objects (start/end events, activities, splits, merges, parameters) and a
//! list of sequence flows between them. Objects and flows are owned by the
//! microflow; nothing is shared across microflows.

use serde::{Deserialize, Serialize};

// =============================================================================
// GEOMETRY
// =============================================================================

/// Identifier of an object, unique within its microflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Middle point of an object on the canvas, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Side of an object a sequence flow attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorPosition {
    Top,
    Right,
    Bottom,
    Left,
}

impl ConnectorPosition {
    /// Connection index as stored by the modeler (Top = 0 … Left = 3).
    pub fn index(self) -> u8 {
        match self {
            ConnectorPosition::Top => 0,
            ConnectorPosition::Right => 1,
            ConnectorPosition::Bottom => 2,
            ConnectorPosition::Left => 3,
        }
    }
}

// =============================================================================
// TYPES & TEXT
// =============================================================================

/// Data type of a variable, parameter or microflow return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DataType {
    Void,
    Boolean,
    Integer,
    Long,
    Decimal,
    String,
    DateTime,
    /// Value of the named enumeration (qualified name).
    Enumeration { enumeration: String },
    /// Single object of the named entity (qualified name).
    Object { entity: String },
    /// List of objects of the named entity (qualified name).
    List { entity: String },
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Void => write!(f, "Void"),
            DataType::Boolean => write!(f, "Boolean"),
            DataType::Integer => write!(f, "Integer"),
            DataType::Long => write!(f, "Long"),
            DataType::Decimal => write!(f, "Decimal"),
            DataType::String => write!(f, "String"),
            DataType::DateTime => write!(f, "DateTime"),
            DataType::Enumeration { enumeration } => write!(f, "Enumeration({enumeration})"),
            DataType::Object { entity } => write!(f, "Object({entity})"),
            DataType::List { entity } => write!(f, "List({entity})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub language_code: String,
    pub text: String,
}

/// Translatable text. Generated text only carries an `en_US` translation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Text {
    pub translations: Vec<Translation>,
}

impl Text {
    pub const DEFAULT_LANGUAGE: &'static str = "en_US";

    pub fn english(text: impl Into<String>) -> Self {
        Text {
            translations: vec![Translation {
                language_code: Self::DEFAULT_LANGUAGE.into(),
                text: text.into(),
            }],
        }
    }

    pub fn get(&self, language_code: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.language_code == language_code)
            .map(|t| t.text.as_str())
    }
}

// =============================================================================
// ACTIONS (payload of an action activity)
// =============================================================================

/// Background color of an action activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityColor {
    #[default]
    Default,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeListOperation {
    Add,
    Remove,
    Clear,
    Set,
}

/// The operation performed by an action activity. Closed set: actions the
/// generator does not model are carried as `Other` with their type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    CreateVariable(CreateVariableAction),
    ChangeVariable(ChangeVariableAction),
    ChangeList(ChangeListAction),
    Delete(DeleteAction),
    LogMessage(LogMessageAction),
    ShowPage(ShowPageAction),
    JavaActionCall(JavaActionCallAction),
    MicroflowCall(MicroflowCallAction),
    ValidationFeedback(ValidationFeedbackAction),
    Other { type_name: String },
}

impl Action {
    /// Short human-readable name of the action kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Action::CreateVariable(_) => "CreateVariable",
            Action::ChangeVariable(_) => "ChangeVariable",
            Action::ChangeList(_) => "ChangeList",
            Action::Delete(_) => "Delete",
            Action::LogMessage(_) => "LogMessage",
            Action::ShowPage(_) => "ShowPage",
            Action::JavaActionCall(_) => "JavaActionCall",
            Action::MicroflowCall(_) => "MicroflowCall",
            Action::ValidationFeedback(_) => "ValidationFeedback",
            Action::Other { type_name } => type_name,
        }
    }
}

/// `create variable $name: type = initial_value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVariableAction {
    pub variable_name: String,
    pub variable_type: DataType,
    /// Expression evaluated to initialise the variable.
    pub initial_value: String,
}

/// `change variable $name = value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeVariableAction {
    pub variable_name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeListAction {
    pub list_variable: String,
    pub operation: ChangeListOperation,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAction {
    pub variable_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessageAction {
    pub level: LogLevel,
    /// Log node the message is written to.
    pub node: String,
    /// Message template; `{1}`, `{2}` … refer to `arguments`.
    pub template: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowPageAction {
    /// Qualified name of the page.
    pub page: String,
    /// Variable passed as the page parameter, e.g. `$Order`.
    pub page_argument: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaActionCallAction {
    /// Qualified name of the Java action.
    pub java_action: String,
    pub output_variable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroflowCallAction {
    /// Qualified name of the called microflow.
    pub microflow: String,
    pub output_variable: Option<String>,
}

/// Reference to an attribute: qualified entity name plus attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRef {
    pub entity: String,
    pub attribute: String,
}

impl AttributeRef {
    /// Entity name without its module prefix.
    pub fn entity_name(&self) -> &str {
        self.entity
            .split_once('.')
            .map(|(_, name)| name)
            .unwrap_or(&self.entity)
    }
}

/// Shows a validation message next to an attribute of an object variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFeedbackAction {
    pub object_variable: String,
    pub attribute: AttributeRef,
    pub feedback: Text,
}

// =============================================================================
// OBJECTS (nodes)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectKind {
    StartEvent,
    EndEvent {
        /// Expression returned by the microflow; empty for `Void`.
        return_value: String,
    },
    ActionActivity {
        action: Action,
        background_color: ActivityColor,
    },
    ExclusiveSplit {
        /// Boolean expression deciding the outgoing flow.
        condition: String,
        caption: String,
    },
    ExclusiveMerge,
    Parameter {
        name: String,
        variable_type: DataType,
    },
}

/// A node of the microflow canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroflowObject {
    pub id: ObjectId,
    pub position: Position,
    pub size: Size,
    pub kind: ObjectKind,
}

impl MicroflowObject {
    pub fn is_start(&self) -> bool {
        matches!(self.kind, ObjectKind::StartEvent)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, ObjectKind::EndEvent { .. })
    }

    pub fn is_split(&self) -> bool {
        matches!(self.kind, ObjectKind::ExclusiveSplit { .. })
    }

    pub fn is_merge(&self) -> bool {
        matches!(self.kind, ObjectKind::ExclusiveMerge)
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind, ObjectKind::Parameter { .. })
    }

    pub fn action(&self) -> Option<&Action> {
        match &self.kind {
            ObjectKind::ActionActivity { action, .. } => Some(action),
            _ => None,
        }
    }
}

// =============================================================================
// SEQUENCE FLOWS (edges)
// =============================================================================

/// Discriminator on a flow leaving an exclusive split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseValue(pub String);

impl CaseValue {
    pub fn new(value: impl Into<String>) -> Self {
        CaseValue(value.into())
    }

    /// `"true"` / `"false"` case of a boolean split.
    pub fn boolean(value: bool) -> Self {
        CaseValue(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceFlow {
    pub origin: ObjectId,
    pub destination: ObjectId,
    pub origin_connection: ConnectorPosition,
    pub destination_connection: ConnectorPosition,
    /// Present only when the origin is an exclusive split.
    pub case_value: Option<CaseValue>,
}

// =============================================================================
// MICROFLOW (graph)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Microflow {
    pub name: String,
    pub return_type: DataType,
    #[serde(default)]
    pub allow_concurrent_execution: bool,
    #[serde(default)]
    pub concurrency_error_message: Text,
    #[serde(default)]
    pub objects: Vec<MicroflowObject>,
    #[serde(default)]
    pub flows: Vec<SequenceFlow>,
}

impl Microflow {
    pub fn new(name: impl Into<String>, return_type: DataType) -> Self {
        Microflow {
            name: name.into(),
            return_type,
            allow_concurrent_execution: true,
            concurrency_error_message: Text::english(""),
            objects: Vec::new(),
            flows: Vec::new(),
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&MicroflowObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn start_event(&self) -> Option<&MicroflowObject> {
        self.objects.iter().find(|o| o.is_start())
    }

    pub fn parameters(&self) -> impl Iterator<Item = &MicroflowObject> {
        self.objects.iter().filter(|o| o.is_parameter())
    }

    /// Action activities in object order.
    pub fn activities(&self) -> impl Iterator<Item = (&MicroflowObject, &Action)> {
        self.objects
            .iter()
            .filter_map(|o| o.action().map(|a| (o, a)))
    }

    pub fn outgoing(&self, id: ObjectId) -> impl Iterator<Item = &SequenceFlow> {
        self.flows.iter().filter(move |f| f.origin == id)
    }

    pub fn incoming(&self, id: ObjectId) -> impl Iterator<Item = &SequenceFlow> {
        self.flows.iter().filter(move |f| f.destination == id)
    }

    /// Id for the next appended object.
    pub fn next_object_id(&self) -> ObjectId {
        ObjectId(self.objects.iter().map(|o| o.id.0 + 1).max().unwrap_or(0))
    }

    /// Walk the main line from the start event, following the `"true"` case
    /// out of splits and the only flow out of everything else.
    pub fn main_line(&self) -> Vec<&MicroflowObject> {
        let mut line = Vec::new();
        let mut current = self.start_event();
        while let Some(object) = current {
            if line.iter().any(|o: &&MicroflowObject| o.id == object.id) {
                break;
            }
            line.push(object);
            let next = if object.is_split() {
                self.outgoing(object.id)
                    .find(|f| f.case_value == Some(CaseValue::boolean(true)))
            } else {
                self.outgoing(object.id).next()
            };
            current = next.and_then(|f| self.object(f.destination));
        }
        line
    }
}
