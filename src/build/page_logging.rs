//! Open-with-log microflow for a page.
//!
//! Records who opened the page before showing it:
//! start → IP address → browser type → log → show page → end.

use super::builder::MicroflowBuilder;
use crate::config::PageLoggingSettings;
use crate::microflow::{DataType, LogLevel, Microflow};

const STEP: i32 = 200;

/// Build the microflow that logs access to `page` and then opens it.
///
/// `parameter_entity` is the qualified name of the entity the page expects;
/// when present the microflow takes it as its only input parameter, named
/// after the entity, and passes it on to the page.
pub fn build_page_logging_microflow(
    page: &str,
    parameter_entity: Option<&str>,
    settings: &PageLoggingSettings,
) -> Microflow {
    let mut mf = MicroflowBuilder::new(settings.microflow_name(page), DataType::Boolean);

    let page_argument = parameter_entity.map(|entity| {
        let name = entity
            .split_once('.')
            .map(|(_, name)| name)
            .unwrap_or(entity);
        mf.add_parameter(
            name,
            DataType::Object {
                entity: entity.to_string(),
            },
        );
        format!("${name}")
    });

    let start = mf.nodes().start_event();
    let start = mf.add_object(start, 0, 0, None);

    let ip_address = mf.nodes().java_action_call(
        settings.ip_address_action.as_str(),
        Some(settings.ip_address_variable.clone()),
    );
    let ip_address = mf.append(ip_address, STEP, 0, start);

    let browser_type = mf.nodes().java_action_call(
        settings.browser_type_action.as_str(),
        Some(settings.browser_type_variable.clone()),
    );
    let browser_type = mf.append(browser_type, STEP, 0, ip_address);

    let log = mf.nodes().log_message(
        LogLevel::Info,
        settings.log_node.as_str(),
        page,
        vec![
            format!("${}", settings.ip_address_variable),
            format!("${}", settings.browser_type_variable),
        ],
    );
    let log = mf.append(log, STEP, 0, browser_type);

    let show_page = mf.nodes().show_page(page, page_argument);
    let show_page = mf.append(show_page, STEP, 0, log);

    let end = mf.nodes().end_event("false");
    mf.append(end, 100, 0, show_page);

    mf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microflow::{Action, ObjectKind, validate_microflow};

    #[test]
    fn page_without_parameter() {
        let settings = PageLoggingSettings::default();
        let microflow = build_page_logging_microflow("Admin.Home", None, &settings);
        assert_eq!(microflow.name, "ACT_Home_OpenWithLog");
        assert_eq!(microflow.return_type, DataType::Boolean);
        assert_eq!(microflow.parameters().count(), 0);
        assert!(validate_microflow(&microflow).is_empty());

        let show = microflow
            .activities()
            .find_map(|(_, a)| match a {
                Action::ShowPage(show) => Some(show),
                _ => None,
            })
            .unwrap();
        assert_eq!(show.page, "Admin.Home");
        assert_eq!(show.page_argument, None);
    }

    #[test]
    fn end_returns_false_after_show_page() {
        let settings = PageLoggingSettings::default();
        let microflow = build_page_logging_microflow("Orders.Page_List", Some("Orders.Order"), &settings);
        let line = microflow.main_line();
        let last = line.last().unwrap();
        assert!(matches!(&last.kind, ObjectKind::EndEvent { return_value } if return_value == "false"));
        assert_eq!(last.position.x, 900);
    }
}
