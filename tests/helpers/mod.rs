use microflow_gen::config::{GeneratorConfig, ModuleSelection};
use microflow_gen::microflow::*;
use microflow_gen::model::{DocumentKind, WorkingCopy, parse_working_copy};
use microflow_gen::repository::InMemoryRepository;

// =============================================================================
// Project fixtures
// =============================================================================

pub const PROJECT: &str = include_str!("../fixtures/project.json");

/// Fully loaded working copy of the fixture project.
pub fn working_copy() -> WorkingCopy {
    parse_working_copy(PROJECT).expect("fixture project should parse")
}

/// Repository over the fixture project, checked out with nothing loaded.
pub fn repository() -> InMemoryRepository {
    InMemoryRepository::from_json(PROJECT).expect("fixture project should parse")
}

/// Single-module project with a page that shows two different entities.
pub fn ambiguous_page_project() -> InMemoryRepository {
    InMemoryRepository::from_json(
        r#"{
            "modules": [
                {
                    "name": "Orders",
                    "domain_model": {
                        "entities": [
                            { "name": "Order" },
                            { "name": "Customer" }
                        ]
                    },
                    "documents": [
                        {
                            "kind": "Page",
                            "name": "Order_Edit",
                            "widgets": [
                                { "type": "DataView", "source": { "type": "DirectEntity", "entity": "Orders.Order" } },
                                { "type": "DataView", "source": { "type": "DirectEntity", "entity": "Orders.Customer" } }
                            ]
                        }
                    ]
                },
                {
                    "name": "CustomLogging",
                    "documents": [
                        { "kind": "JavaAction", "name": "Java_IPAddress" },
                        { "kind": "JavaAction", "name": "Java_BrowserType" }
                    ]
                }
            ]
        }"#,
    )
    .expect("inline project should parse")
}

// =============================================================================
// Configuration
// =============================================================================

/// Validation of the given entities of `Sales`; all of them when empty.
pub fn sales_validation_config(entities: &[&str]) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.validation.modules = vec![ModuleSelection {
        name: "Sales".into(),
        entities: entities.iter().map(|e| e.to_string()).collect(),
    }];
    config
}

// =============================================================================
// Lookups
// =============================================================================

pub fn microflow<'a>(wc: &'a WorkingCopy, qualified_name: &str) -> &'a Microflow {
    let id = wc
        .find_by_qualified_name(DocumentKind::Microflow, qualified_name)
        .unwrap_or_else(|| panic!("microflow {qualified_name} should exist"));
    wc.microflow(id).expect("microflow should be loaded")
}

/// Short label of an object, for comparing main lines.
pub fn label(object: &MicroflowObject) -> String {
    match &object.kind {
        ObjectKind::StartEvent => "start".into(),
        ObjectKind::EndEvent { .. } => "end".into(),
        ObjectKind::ExclusiveSplit { caption, .. } => format!("split:{caption}"),
        ObjectKind::ExclusiveMerge => "merge".into(),
        ObjectKind::Parameter { name, .. } => format!("param:{name}"),
        ObjectKind::ActionActivity { action, .. } => match action {
            Action::JavaActionCall(call) => format!("java:{}", call.java_action),
            Action::ShowPage(show) => format!("page:{}", show.page),
            other => other.kind_name().to_string(),
        },
    }
}

pub fn main_line_labels(microflow: &Microflow) -> Vec<String> {
    microflow.main_line().into_iter().map(label).collect()
}

pub fn feedback_targets(microflow: &Microflow) -> Vec<(String, String)> {
    microflow
        .activities()
        .filter_map(|(_, action)| match action {
            Action::ValidationFeedback(feedback) => Some((
                feedback.attribute.entity_name().to_string(),
                feedback.attribute.attribute.clone(),
            )),
            _ => None,
        })
        .collect()
}
