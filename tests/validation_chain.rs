//! Validation microflow generation against a working copy.

#[allow(dead_code)]
mod helpers;

use microflow_gen::config::ValidationSettings;
use microflow_gen::generate::{RunKind, RunReport, SkipReason, generate_validation};
use microflow_gen::microflow::*;

fn run(entities: &[&str]) -> (microflow_gen::model::WorkingCopy, RunReport) {
    let mut wc = helpers::working_copy();
    let config = helpers::sales_validation_config(entities);
    let mut report = RunReport::new(RunKind::Validation);
    generate_validation(&mut wc, &config.validation, &mut report).expect("generation should succeed");
    (wc, report)
}

#[test]
fn customer_scenario() {
    let (wc, report) = run(&["Customer"]);
    assert_eq!(report.created_microflows, vec!["Sales.VAL_Customer"]);
    assert_eq!(report.created_folders, vec!["Sales/Validation"]);

    let microflow = helpers::microflow(&wc, "Sales.VAL_Customer");
    assert_eq!(microflow.return_type, DataType::Boolean);
    assert_eq!(
        helpers::main_line_labels(microflow),
        vec![
            "start",
            "CreateVariable",
            "split:Name",
            "merge",
            "split:Age",
            "merge",
            "end"
        ]
    );
    assert_eq!(
        helpers::feedback_targets(microflow),
        vec![
            ("Customer".to_string(), "Name".to_string()),
            ("Customer".to_string(), "Age".to_string())
        ]
    );

    let end = microflow.objects.iter().find(|o| o.is_end()).unwrap();
    assert!(matches!(&end.kind, ObjectKind::EndEvent { return_value } if return_value == "$IsValid"));

    let parameters: Vec<_> = microflow.parameters().collect();
    assert_eq!(parameters.len(), 1);
    assert!(matches!(
        &parameters[0].kind,
        ObjectKind::Parameter { name, variable_type: DataType::Object { entity } }
            if name == "Customer" && entity == "Sales.Customer"
    ));
}

#[test]
fn one_diamond_per_supported_attribute() {
    let (wc, report) = run(&["Invoice"]);
    let microflow = helpers::microflow(&wc, "Sales.VAL_Invoice");

    // Number (AutoNumber) and Scan (Binary) have no template.
    let splits = microflow.objects.iter().filter(|o| o.is_split()).count();
    let merges = microflow.objects.iter().filter(|o| o.is_merge()).count();
    assert_eq!((splits, merges), (3, 3));
    assert_eq!(
        helpers::main_line_labels(microflow),
        vec![
            "start",
            "CreateVariable",
            "split:Total",
            "merge",
            "split:Paid",
            "merge",
            "split:Status",
            "merge",
            "end"
        ]
    );

    assert_eq!(report.skipped_attributes(), 2);
    assert_eq!(
        report.skips[0].reason,
        SkipReason::UnsupportedAttributeType {
            attribute_type: "AutoNumber".into()
        }
    );
    assert_eq!(report.skips[1].subject, "Sales.Invoice.Scan");
}

#[test]
fn split_conditions_follow_attribute_types() {
    let (wc, _) = run(&["Invoice"]);
    let microflow = helpers::microflow(&wc, "Sales.VAL_Invoice");
    let conditions: Vec<&str> = microflow
        .objects
        .iter()
        .filter_map(|o| match &o.kind {
            ObjectKind::ExclusiveSplit { condition, .. } => Some(condition.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        conditions,
        vec![
            "$Invoice/Total != empty and $Invoice/Total > 0",
            "$Invoice/Paid",
            "$Invoice/Status != empty"
        ]
    );
}

#[test]
fn split_flows_carry_complementary_cases() {
    let (wc, _) = run(&["Customer"]);
    let microflow = helpers::microflow(&wc, "Sales.VAL_Customer");
    for split in microflow.objects.iter().filter(|o| o.is_split()) {
        let flows: Vec<&SequenceFlow> = microflow.outgoing(split.id).collect();
        assert_eq!(flows.len(), 2);

        let false_flow = flows
            .iter()
            .find(|f| f.case_value == Some(CaseValue::boolean(false)))
            .unwrap();
        assert_eq!(false_flow.origin_connection, ConnectorPosition::Bottom);
        assert_eq!(false_flow.destination_connection, ConnectorPosition::Top);

        let true_flow = flows
            .iter()
            .find(|f| f.case_value == Some(CaseValue::boolean(true)))
            .unwrap();
        assert!(microflow.object(true_flow.destination).unwrap().is_merge());
    }
}

#[test]
fn main_line_moves_right() {
    let (wc, _) = run(&["Customer"]);
    let microflow = helpers::microflow(&wc, "Sales.VAL_Customer");
    let xs: Vec<i32> = microflow.main_line().iter().map(|o| o.position.x).collect();
    assert!(xs.windows(2).all(|w| w[1] > w[0]), "{xs:?}");
    assert!(microflow.main_line().iter().all(|o| o.position.y == 100));
}

#[test]
fn entity_selection_defaults_to_all() {
    let (wc, report) = run(&[]);
    assert_eq!(
        report.created_microflows,
        vec!["Sales.VAL_Customer", "Sales.VAL_Invoice"]
    );
    // Both share one folder.
    assert_eq!(report.created_folders.len(), 1);
    let module = wc.module_by_name("Sales").unwrap();
    let folder = wc.child_folder(module, "Validation").unwrap();
    assert_eq!(wc.documents_in(folder).len(), 2);
}

#[test]
fn custom_settings_are_honoured() {
    let mut wc = helpers::working_copy();
    let mut config = helpers::sales_validation_config(&["Customer"]);
    config.validation = ValidationSettings {
        folder_name: "Checks".into(),
        microflow_prefix: "Val_".into(),
        valid_variable_name: "Ok".into(),
        required_field_message: "Required".into(),
        modules: config.validation.modules,
    };
    let mut report = RunReport::new(RunKind::Validation);
    generate_validation(&mut wc, &config.validation, &mut report).unwrap();

    assert_eq!(report.created_folders, vec!["Sales/Checks"]);
    let microflow = helpers::microflow(&wc, "Sales.Val_Customer");
    let end = microflow.objects.iter().find(|o| o.is_end()).unwrap();
    assert!(matches!(&end.kind, ObjectKind::EndEvent { return_value } if return_value == "$Ok"));
}

#[test]
fn unknown_module_creates_nothing() {
    let mut wc = helpers::working_copy();
    let mut config = helpers::sales_validation_config(&[]);
    config.validation.modules.push(microflow_gen::config::ModuleSelection {
        name: "Billing".into(),
        entities: vec![],
    });
    let documents = wc.document_count();
    let mut report = RunReport::new(RunKind::Validation);

    let err = generate_validation(&mut wc, &config.validation, &mut report).unwrap_err();
    assert_eq!(err.code(), "G001");
    assert_eq!(wc.document_count(), documents);
    assert!(!report.has_changes());
}
