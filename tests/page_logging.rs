//! Open-with-log microflow generation.

#[allow(dead_code)]
mod helpers;

use microflow_gen::config::PageLoggingSettings;
use microflow_gen::error::GenError;
use microflow_gen::generate::{RunKind, RunReport, generate_page_logging};
use microflow_gen::microflow::*;
use microflow_gen::model::DocumentKind;

fn generate(wc: &mut microflow_gen::model::WorkingCopy) -> Result<RunReport, GenError> {
    let mut report = RunReport::new(RunKind::PageLogging);
    generate_page_logging(wc, &PageLoggingSettings::default(), &mut report)?;
    Ok(report)
}

#[test]
fn page_with_one_entity() {
    let mut wc = helpers::working_copy();
    let report = generate(&mut wc).unwrap();
    assert_eq!(
        report.created_microflows,
        vec![
            "CustomLogging.ACT_Page_List_OpenWithLog",
            "CustomLogging.ACT_Page_Overview_OpenWithLog"
        ]
    );

    let microflow = helpers::microflow(&wc, "CustomLogging.ACT_Page_List_OpenWithLog");
    assert_eq!(
        helpers::main_line_labels(microflow),
        vec![
            "start",
            "java:CustomLogging.Java_IPAddress",
            "java:CustomLogging.Java_BrowserType",
            "LogMessage",
            "page:Orders.Page_List",
            "end"
        ]
    );

    let parameters: Vec<_> = microflow.parameters().collect();
    assert_eq!(parameters.len(), 1);
    assert!(matches!(
        &parameters[0].kind,
        ObjectKind::Parameter { name, variable_type: DataType::Object { entity } }
            if name == "Order" && entity == "Orders.Order"
    ));

    let show = microflow
        .activities()
        .find_map(|(_, a)| match a {
            Action::ShowPage(show) => Some(show),
            _ => None,
        })
        .unwrap();
    assert_eq!(show.page_argument.as_deref(), Some("$Order"));
}

#[test]
fn page_without_entity_has_no_parameter() {
    let mut wc = helpers::working_copy();
    generate(&mut wc).unwrap();
    let microflow = helpers::microflow(&wc, "CustomLogging.ACT_Page_Overview_OpenWithLog");
    assert_eq!(microflow.parameters().count(), 0);
}

#[test]
fn log_and_java_calls() {
    let mut wc = helpers::working_copy();
    generate(&mut wc).unwrap();
    let microflow = helpers::microflow(&wc, "CustomLogging.ACT_Page_List_OpenWithLog");

    let outputs: Vec<Option<&str>> = microflow
        .activities()
        .filter_map(|(_, a)| match a {
            Action::JavaActionCall(call) => Some(call.output_variable.as_deref()),
            _ => None,
        })
        .collect();
    assert_eq!(outputs, vec![Some("IPAddress"), Some("BrowserType")]);

    let (object, log) = microflow
        .activities()
        .find_map(|(o, a)| match a {
            Action::LogMessage(log) => Some((o, log)),
            _ => None,
        })
        .unwrap();
    assert_eq!(log.level, LogLevel::Info);
    assert_eq!(log.node, "PageAccess");
    assert_eq!(log.template, "Orders.Page_List");
    assert!(matches!(
        object.kind,
        ObjectKind::ActionActivity {
            background_color: ActivityColor::Gray,
            ..
        }
    ));
}

#[test]
fn microflows_go_to_a_folder_per_module() {
    let mut wc = helpers::working_copy();
    let report = generate(&mut wc).unwrap();
    assert_eq!(
        report.created_folders,
        vec!["CustomLogging/PageLogging", "CustomLogging/PageLogging/Orders"]
    );

    let id = wc
        .find_by_qualified_name(DocumentKind::Microflow, "CustomLogging.ACT_Page_List_OpenWithLog")
        .unwrap();
    let folder = wc.container(wc.document(id).unwrap().container).unwrap();
    assert_eq!(folder.name, "Orders");
}

#[test]
fn existing_module_folder_is_reused() {
    let mut wc = helpers::working_copy();
    let logging = wc.module_by_name("CustomLogging").unwrap();
    let archive = wc.create_folder(logging, "Archive").unwrap();
    let orders = wc.create_folder(archive, "Orders").unwrap();

    let report = generate(&mut wc).unwrap();
    assert!(report.created_folders.is_empty());
    assert_eq!(wc.documents_in(orders).len(), 2);
}

#[test]
fn missing_logging_module_is_fatal() {
    let mut wc = helpers::working_copy();
    let settings = PageLoggingSettings {
        logging_module: "AuditTrail".into(),
        ..PageLoggingSettings::default()
    };
    let documents = wc.document_count();
    let mut report = RunReport::new(RunKind::PageLogging);

    let err = generate_page_logging(&mut wc, &settings, &mut report).unwrap_err();
    assert!(matches!(err, GenError::MissingPrerequisite { .. }));
    assert_eq!(wc.document_count(), documents);
}

#[test]
fn missing_java_action_is_fatal() {
    let mut wc = helpers::working_copy();
    let settings = PageLoggingSettings {
        browser_type_action: "CustomLogging.Java_UserAgent".into(),
        ..PageLoggingSettings::default()
    };
    let mut report = RunReport::new(RunKind::PageLogging);
    let err = generate_page_logging(&mut wc, &settings, &mut report).unwrap_err();
    assert!(err.to_string().contains("Java_UserAgent"), "{err}");
}
