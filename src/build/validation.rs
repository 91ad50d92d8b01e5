//! Validation chain assembler.
//!
//! A validation microflow checks every supported attribute of an entity in
//! declaration order. Each check is a diamond hanging off the main line:
//!
//! ```text
//! tail ─► split ──────── true ───────► merge ─► (next tail)
//!           │ false                      ▲
//!           ▼                            │
//!     IsValid = false ─► feedback ───────┘
//! ```
//!
//! Attributes whose type has no validity template are skipped and leave the
//! tail where it was.

use log::{debug, warn};

use super::builder::MicroflowBuilder;
use super::connect::Link;
use crate::config::ValidationSettings;
use crate::microflow::{AttributeRef, CaseValue, ConnectorPosition, DataType, Microflow, ObjectId};
use crate::model::{Attribute, AttributeType, Entity};

/// Horizontal distance from the tail to a split, and from the invalidation
/// step to the feedback.
const CHAIN_STEP: i32 = 200;
/// Depth of the false path below the main line.
const BRANCH_DEPTH: i32 = 100;

/// Boolean expression that holds when `reference` carries a usable value.
/// `None` for types without a template.
pub fn split_expression(attribute_type: &AttributeType, reference: &str) -> Option<String> {
    match attribute_type {
        AttributeType::Boolean => Some(reference.to_string()),
        AttributeType::Currency
        | AttributeType::Decimal
        | AttributeType::Float
        | AttributeType::Integer
        | AttributeType::Long => Some(format!("{reference} != empty and {reference} > 0")),
        AttributeType::DateTime | AttributeType::Enumeration { .. } => {
            Some(format!("{reference} != empty"))
        }
        AttributeType::String { .. } => Some(format!("{reference} != empty and {reference} != ''")),
        AttributeType::AutoNumber | AttributeType::Binary | AttributeType::HashString => None,
    }
}

/// `$Customer/Name`
pub fn attribute_reference(entity_name: &str, attribute_name: &str) -> String {
    format!("${entity_name}/{attribute_name}")
}

/// What happened to one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// A diamond was appended; `tail` is its merge.
    Extended { tail: ObjectId },
    /// No template for the attribute's type; the tail is unchanged.
    Skipped { tail: ObjectId },
}

impl ChainOutcome {
    pub fn tail(&self) -> ObjectId {
        match self {
            ChainOutcome::Extended { tail } | ChainOutcome::Skipped { tail } => *tail,
        }
    }
}

/// Attribute left out of a validation microflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAttribute {
    pub attribute: String,
    pub attribute_type: String,
}

/// Append the check for one attribute after `tail`.
///
/// `entity` is the qualified entity name, used for the feedback target; the
/// object variable and the attribute reference use the short name.
pub fn append_attribute_check(
    mf: &mut MicroflowBuilder,
    entity: &str,
    attribute: &Attribute,
    tail: ObjectId,
    settings: &ValidationSettings,
) -> ChainOutcome {
    let attribute_ref = AttributeRef {
        entity: entity.to_string(),
        attribute: attribute.name.clone(),
    };
    let entity_name = attribute_ref.entity_name().to_string();
    let reference = attribute_reference(&entity_name, &attribute.name);

    let Some(expression) = split_expression(&attribute.attribute_type, &reference) else {
        warn!(
            entity = entity,
            attribute = attribute.name.as_str(),
            attribute_type = attribute.attribute_type.type_name();
            "No validity template for attribute type, skipping attribute"
        );
        return ChainOutcome::Skipped { tail };
    };

    let split = mf.nodes().exclusive_split(expression, attribute.name.as_str());
    let split = mf.append(split, CHAIN_STEP, 0, tail);

    let invalidate = mf
        .nodes()
        .change_variable(settings.valid_variable_name.as_str(), "false");
    let invalidate = mf.add_object(
        invalidate,
        0,
        BRANCH_DEPTH,
        Some((
            split,
            Link::ports(ConnectorPosition::Bottom, ConnectorPosition::Top)
                .with_case(CaseValue::boolean(false)),
        )),
    );

    let feedback = mf.nodes().validation_feedback(
        entity_name.as_str(),
        attribute_ref,
        settings.required_field_message.as_str(),
    );
    let feedback = mf.append(feedback, CHAIN_STEP, 0, invalidate);

    let merge = mf.nodes().exclusive_merge();
    let merge = mf.add_object(
        merge,
        0,
        -BRANCH_DEPTH,
        Some((
            feedback,
            Link::ports(ConnectorPosition::Top, ConnectorPosition::Bottom),
        )),
    );

    mf.connect(split, merge, Link::default().with_case(CaseValue::boolean(true)));

    debug!(
        entity = entity,
        attribute = attribute.name.as_str(),
        split = split.0,
        merge = merge.0;
        "Appended attribute check"
    );
    ChainOutcome::Extended { tail: merge }
}

/// Build the validation microflow for `entity` of `module_name`.
///
/// Returns the microflow and the attributes that had no validity template.
pub fn build_validation_microflow(
    entity: &Entity,
    module_name: &str,
    settings: &ValidationSettings,
) -> (Microflow, Vec<SkippedAttribute>) {
    let qualified_entity = format!("{module_name}.{}", entity.name);
    let name = format!("{}{}", settings.microflow_prefix, entity.name);
    let mut mf = MicroflowBuilder::new(name, DataType::Boolean);

    mf.add_parameter(
        entity.name.as_str(),
        DataType::Object {
            entity: qualified_entity.clone(),
        },
    );

    let start = mf.nodes().start_event();
    let start = mf.add_object(start, 0, 0, None);

    let is_valid = mf.nodes().create_variable(
        DataType::Boolean,
        settings.valid_variable_name.as_str(),
        "true",
    );
    let mut tail = mf.append(is_valid, 100, 0, start);

    let mut skipped = Vec::new();
    for attribute in &entity.attributes {
        let outcome = append_attribute_check(&mut mf, &qualified_entity, attribute, tail, settings);
        if let ChainOutcome::Skipped { .. } = outcome {
            skipped.push(SkippedAttribute {
                attribute: attribute.name.clone(),
                attribute_type: attribute.attribute_type.type_name().to_string(),
            });
        }
        tail = outcome.tail();
    }

    let end = mf
        .nodes()
        .end_event(format!("${}", settings.valid_variable_name));
    mf.append(end, 100, 0, tail);

    (mf.finish(), skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microflow::{Action, ObjectKind, validate_microflow};

    fn attribute(name: &str, attribute_type: AttributeType) -> Attribute {
        Attribute {
            name: name.into(),
            attribute_type,
        }
    }

    #[test]
    fn templates_per_type() {
        let r = "$Customer/Age";
        assert_eq!(split_expression(&AttributeType::Boolean, r).unwrap(), r);
        assert_eq!(
            split_expression(&AttributeType::Integer, r).unwrap(),
            "$Customer/Age != empty and $Customer/Age > 0"
        );
        assert_eq!(
            split_expression(&AttributeType::DateTime, r).unwrap(),
            "$Customer/Age != empty"
        );
        assert_eq!(
            split_expression(&AttributeType::String { length: Some(200) }, r).unwrap(),
            "$Customer/Age != empty and $Customer/Age != ''"
        );
        assert!(split_expression(&AttributeType::AutoNumber, r).is_none());
        assert!(split_expression(&AttributeType::Binary, r).is_none());
    }

    #[test]
    fn unsupported_attribute_keeps_tail() {
        let settings = ValidationSettings::default();
        let mut mf = MicroflowBuilder::new("VAL_Doc", DataType::Boolean);
        let start = mf.nodes().start_event();
        let start = mf.add_object(start, 0, 0, None);
        let outcome = append_attribute_check(
            &mut mf,
            "Docs.Doc",
            &attribute("Content", AttributeType::Binary),
            start,
            &settings,
        );
        assert_eq!(outcome, ChainOutcome::Skipped { tail: start });
        assert_eq!(mf.microflow().objects.len(), 1);
        assert!(mf.microflow().flows.is_empty());
    }

    #[test]
    fn diamond_geometry() {
        let settings = ValidationSettings::default();
        let entity = Entity {
            name: "Customer".into(),
            attributes: vec![attribute("Name", AttributeType::String { length: None })],
        };
        let (microflow, skipped) = build_validation_microflow(&entity, "Sales", &settings);
        assert!(skipped.is_empty());
        assert!(validate_microflow(&microflow).is_empty());

        let position = |pred: fn(&ObjectKind) -> bool| {
            microflow
                .objects
                .iter()
                .find(|o| pred(&o.kind))
                .map(|o| (o.position.x, o.position.y))
                .unwrap()
        };
        let split = position(|k| matches!(k, ObjectKind::ExclusiveSplit { .. }));
        let merge = position(|k| matches!(k, ObjectKind::ExclusiveMerge));
        let end = position(|k| matches!(k, ObjectKind::EndEvent { .. }));
        assert_eq!(split, (300, 100));
        assert_eq!(merge, (500, 100));
        assert_eq!(end, (600, 100));

        let feedback = microflow
            .activities()
            .find_map(|(o, a)| match a {
                Action::ValidationFeedback(f) => Some((o.position, f)),
                _ => None,
            })
            .unwrap();
        assert_eq!((feedback.0.x, feedback.0.y), (500, 200));
        assert_eq!(feedback.1.object_variable, "Customer");
        assert_eq!(feedback.1.attribute.entity, "Sales.Customer");
        assert_eq!(feedback.1.feedback.get("en_US"), Some("This field is required."));
    }
}
