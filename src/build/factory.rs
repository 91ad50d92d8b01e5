//! Node factory: one constructor per object variant, each returning a new
//! unconnected object with default geometry. Placement happens when the
//! object is appended to a builder.

use crate::microflow::*;

pub const EVENT_SIZE: Size = Size::new(20, 20);
pub const PARAMETER_SIZE: Size = Size::new(30, 30);
pub const ACTIVITY_SIZE: Size = Size::new(120, 60);
pub const SPLIT_SIZE: Size = Size::new(90, 60);
pub const MERGE_SIZE: Size = Size::new(40, 40);

/// Background color for an activity, as a function of its action kind.
pub fn activity_color(action: &Action) -> ActivityColor {
    match action {
        Action::CreateVariable(_) => ActivityColor::Yellow,
        Action::ChangeList(_) => ActivityColor::Blue,
        Action::Delete(_) => ActivityColor::Red,
        Action::MicroflowCall(_) => ActivityColor::Green,
        Action::LogMessage(_) => ActivityColor::Gray,
        Action::ChangeVariable(_)
        | Action::ShowPage(_)
        | Action::JavaActionCall(_)
        | Action::ValidationFeedback(_)
        | Action::Other { .. } => ActivityColor::Default,
    }
}

/// Hands out object ids and builds objects.
#[derive(Debug, Clone, Default)]
pub struct NodeFactory {
    next_id: u32,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after the objects of an existing microflow.
    pub fn continuing(microflow: &Microflow) -> Self {
        NodeFactory {
            next_id: microflow.next_object_id().0,
        }
    }

    fn object(&mut self, size: Size, kind: ObjectKind) -> MicroflowObject {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        MicroflowObject {
            id,
            position: Position::default(),
            size,
            kind,
        }
    }

    pub fn start_event(&mut self) -> MicroflowObject {
        self.object(EVENT_SIZE, ObjectKind::StartEvent)
    }

    pub fn end_event(&mut self, return_value: impl Into<String>) -> MicroflowObject {
        self.object(
            EVENT_SIZE,
            ObjectKind::EndEvent {
                return_value: return_value.into(),
            },
        )
    }

    pub fn parameter(&mut self, name: impl Into<String>, variable_type: DataType) -> MicroflowObject {
        self.object(
            PARAMETER_SIZE,
            ObjectKind::Parameter {
                name: name.into(),
                variable_type,
            },
        )
    }

    /// Wrap an action in an activity colored by [`activity_color`].
    pub fn action_activity(&mut self, action: Action) -> MicroflowObject {
        let background_color = activity_color(&action);
        self.object(
            ACTIVITY_SIZE,
            ObjectKind::ActionActivity {
                action,
                background_color,
            },
        )
    }

    pub fn exclusive_split(
        &mut self,
        condition: impl Into<String>,
        caption: impl Into<String>,
    ) -> MicroflowObject {
        self.object(
            SPLIT_SIZE,
            ObjectKind::ExclusiveSplit {
                condition: condition.into(),
                caption: caption.into(),
            },
        )
    }

    pub fn exclusive_merge(&mut self) -> MicroflowObject {
        self.object(MERGE_SIZE, ObjectKind::ExclusiveMerge)
    }

    // -------------------------------------------------------------------------
    // Activity shorthands
    // -------------------------------------------------------------------------

    pub fn create_variable(
        &mut self,
        variable_type: DataType,
        variable_name: impl Into<String>,
        initial_value: impl Into<String>,
    ) -> MicroflowObject {
        self.action_activity(Action::CreateVariable(CreateVariableAction {
            variable_name: variable_name.into(),
            variable_type,
            initial_value: initial_value.into(),
        }))
    }

    pub fn change_variable(
        &mut self,
        variable_name: impl Into<String>,
        value: impl Into<String>,
    ) -> MicroflowObject {
        self.action_activity(Action::ChangeVariable(ChangeVariableAction {
            variable_name: variable_name.into(),
            value: value.into(),
        }))
    }

    pub fn validation_feedback(
        &mut self,
        object_variable: impl Into<String>,
        attribute: AttributeRef,
        message: impl Into<String>,
    ) -> MicroflowObject {
        self.action_activity(Action::ValidationFeedback(ValidationFeedbackAction {
            object_variable: object_variable.into(),
            attribute,
            feedback: Text::english(message),
        }))
    }

    pub fn java_action_call(
        &mut self,
        java_action: impl Into<String>,
        output_variable: Option<String>,
    ) -> MicroflowObject {
        self.action_activity(Action::JavaActionCall(JavaActionCallAction {
            java_action: java_action.into(),
            output_variable,
        }))
    }

    pub fn log_message(
        &mut self,
        level: LogLevel,
        node: impl Into<String>,
        template: impl Into<String>,
        arguments: Vec<String>,
    ) -> MicroflowObject {
        self.action_activity(Action::LogMessage(LogMessageAction {
            level,
            node: node.into(),
            template: template.into(),
            arguments,
        }))
    }

    pub fn show_page(&mut self, page: impl Into<String>, page_argument: Option<String>) -> MicroflowObject {
        self.action_activity(Action::ShowPage(ShowPageAction {
            page: page.into(),
            page_argument,
        }))
    }
}
