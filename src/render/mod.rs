//! Plain-text outline of a microflow.
//!
//! One line per parameter, object and flow, in storage order. The output is
//! deterministic so it can be diffed and snapshot-tested.

pub mod writer;

use writer::OutlineWriter;

use crate::microflow::*;

pub fn outline(microflow: &Microflow) -> String {
    let mut w = OutlineWriter::new();
    w.section(&format!("microflow {} -> {}", microflow.name, microflow.return_type));

    let parameters: Vec<&MicroflowObject> = microflow.parameters().collect();
    if !parameters.is_empty() {
        w.section("parameters");
        for object in parameters {
            w.line(&format!("{} {} @ {}", object.id, describe(&object.kind), object.position));
        }
        w.dedent();
    }

    w.section("objects");
    for object in microflow.objects.iter().filter(|o| !o.is_parameter()) {
        w.line(&format!("{} {} @ {}", object.id, describe(&object.kind), object.position));
    }
    w.dedent();

    w.section("flows");
    for flow in &microflow.flows {
        let case = flow
            .case_value
            .as_ref()
            .map(|c| format!(" [{}]", c.as_str()))
            .unwrap_or_default();
        w.line(&format!(
            "{} -> {}{} ({:?} -> {:?})",
            flow.origin, flow.destination, case, flow.origin_connection, flow.destination_connection
        ));
    }
    w.dedent();

    w.finish()
}

fn describe(kind: &ObjectKind) -> String {
    match kind {
        ObjectKind::StartEvent => "start".into(),
        ObjectKind::EndEvent { return_value } if return_value.is_empty() => "end".into(),
        ObjectKind::EndEvent { return_value } => format!("end return {return_value}"),
        ObjectKind::ExclusiveSplit { condition, caption } => {
            format!("split '{caption}' if {condition}")
        }
        ObjectKind::ExclusiveMerge => "merge".into(),
        ObjectKind::Parameter {
            name,
            variable_type,
        } => format!("parameter {name}: {variable_type}"),
        ObjectKind::ActionActivity {
            action,
            background_color,
        } => format!("{} [{:?}]", describe_action(action), background_color),
    }
}

fn describe_action(action: &Action) -> String {
    match action {
        Action::CreateVariable(a) => format!(
            "create ${}: {} = {}",
            a.variable_name, a.variable_type, a.initial_value
        ),
        Action::ChangeVariable(a) => format!("change ${} = {}", a.variable_name, a.value),
        Action::ChangeList(a) => format!("change list ${} {:?} {}", a.list_variable, a.operation, a.value),
        Action::Delete(a) => format!("delete ${}", a.variable_name),
        Action::LogMessage(a) => {
            let mut text = format!("log {:?} {} '{}'", a.level, a.node, a.template);
            if !a.arguments.is_empty() {
                text.push_str(&format!(" ({})", a.arguments.join(", ")));
            }
            text
        }
        Action::ShowPage(a) => match &a.page_argument {
            Some(argument) => format!("show page {}({})", a.page, argument),
            None => format!("show page {}", a.page),
        },
        Action::JavaActionCall(a) => call("call java", &a.java_action, a.output_variable.as_deref()),
        Action::MicroflowCall(a) => call("call microflow", &a.microflow, a.output_variable.as_deref()),
        Action::ValidationFeedback(a) => format!(
            "feedback ${}/{} '{}'",
            a.object_variable,
            a.attribute.attribute,
            a.feedback.get(Text::DEFAULT_LANGUAGE).unwrap_or_default()
        ),
        Action::Other { type_name } => type_name.clone(),
    }
}

fn call(verb: &str, target: &str, output: Option<&str>) -> String {
    match output {
        Some(variable) => format!("{verb} {target} -> ${variable}"),
        None => format!("{verb} {target}"),
    }
}
