//! Page parameter discovery.

use super::types::{DataSource, Page, Widget};
use crate::error::GenError;

/// The entity a page expects as its parameter.
///
/// A page's parameter is the entity behind the direct-entity sources of its
/// data views. Excluded pages have none. More than one distinct entity is an
/// error rather than a guess.
pub fn page_parameter_entity(page: &Page, qualified_name: &str) -> Result<Option<String>, GenError> {
    if page.excluded {
        return Ok(None);
    }

    let mut entities: Vec<String> = Vec::new();
    for widget in &page.widgets {
        collect_data_view_entities(widget, &mut entities);
    }

    match entities.len() {
        0 => Ok(None),
        1 => Ok(entities.pop()),
        _ => Err(GenError::AmbiguousPageParameter {
            page: qualified_name.to_string(),
            entities,
        }),
    }
}

fn collect_data_view_entities(widget: &Widget, entities: &mut Vec<String>) {
    if let Widget::DataView {
        source: DataSource::DirectEntity { entity },
        ..
    } = widget
    {
        if !entities.contains(entity) {
            entities.push(entity.clone());
        }
    }
    for child in widget.children() {
        collect_data_view_entities(child, entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_view(entity: &str, children: Vec<Widget>) -> Widget {
        Widget::DataView {
            source: DataSource::DirectEntity {
                entity: entity.into(),
            },
            children,
        }
    }

    fn page(widgets: Vec<Widget>) -> Page {
        Page {
            name: "Order_Edit".into(),
            excluded: false,
            widgets,
        }
    }

    #[test]
    fn page_without_data_view_has_no_parameter() {
        let p = page(vec![Widget::ListView {
            source: DataSource::Database {
                entity: "Sales.Order".into(),
            },
            children: vec![],
        }]);
        assert_eq!(page_parameter_entity(&p, "Sales.Order_Edit").unwrap(), None);
    }

    #[test]
    fn nested_data_views_of_same_entity_are_one_parameter() {
        let p = page(vec![Widget::Container {
            children: vec![data_view("Sales.Order", vec![data_view("Sales.Order", vec![])])],
        }]);
        assert_eq!(
            page_parameter_entity(&p, "Sales.Order_Edit").unwrap(),
            Some("Sales.Order".to_string())
        );
    }

    #[test]
    fn two_entities_are_ambiguous() {
        let p = page(vec![
            data_view("Sales.Order", vec![]),
            data_view("Sales.Customer", vec![]),
        ]);
        match page_parameter_entity(&p, "Sales.Order_Edit") {
            Err(GenError::AmbiguousPageParameter { page, entities }) => {
                assert_eq!(page, "Sales.Order_Edit");
                assert_eq!(entities, vec!["Sales.Order", "Sales.Customer"]);
            }
            other => panic!("Expected AmbiguousPageParameter, got {:?}", other),
        }
    }

    #[test]
    fn excluded_page_has_no_parameter() {
        let mut p = page(vec![
            data_view("Sales.Order", vec![]),
            data_view("Sales.Customer", vec![]),
        ]);
        p.excluded = true;
        assert_eq!(page_parameter_entity(&p, "Sales.Order_Edit").unwrap(), None);
    }
}
