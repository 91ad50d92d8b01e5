//! Recolor pass: bring every activity's background color in line with its
//! action kind.

use log::debug;

use super::factory::activity_color;
use crate::microflow::{Microflow, ObjectKind};

/// Overwrite activity colors that disagree with [`activity_color`] and
/// return how many activities changed. A second pass returns 0.
pub fn recolor(microflow: &mut Microflow) -> usize {
    let mut changes = 0;
    for object in &mut microflow.objects {
        let ObjectKind::ActionActivity {
            action,
            background_color,
        } = &mut object.kind
        else {
            continue;
        };
        let expected = activity_color(action);
        if *background_color != expected {
            debug!(
                microflow = microflow.name.as_str(),
                object = object.id.0,
                action = action.kind_name(),
                from:? = *background_color,
                to:? = expected;
                "Recolored activity"
            );
            *background_color = expected;
            changes += 1;
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::factory::NodeFactory;
    use crate::microflow::{ActivityColor, DataType};

    fn paint(microflow: &mut Microflow, color: ActivityColor) {
        for object in &mut microflow.objects {
            if let ObjectKind::ActionActivity {
                background_color, ..
            } = &mut object.kind
            {
                *background_color = color;
            }
        }
    }

    #[test]
    fn second_pass_changes_nothing() {
        let mut factory = NodeFactory::new();
        let mut microflow = Microflow::new("ACT_Paint", DataType::Void);
        microflow.objects.push(factory.start_event());
        microflow
            .objects
            .push(factory.create_variable(DataType::Boolean, "Done", "false"));
        microflow
            .objects
            .push(factory.change_variable("Done", "true"));
        microflow.objects.push(factory.log_message(
            crate::microflow::LogLevel::Info,
            "Paint",
            "done",
            vec![],
        ));
        paint(&mut microflow, ActivityColor::Purple);

        // All three activities were purple; each gets its own color back.
        assert_eq!(recolor(&mut microflow), 3);
        assert_eq!(recolor(&mut microflow), 0);
    }

    #[test]
    fn correct_colors_are_left_alone() {
        let mut factory = NodeFactory::new();
        let mut microflow = Microflow::new("ACT_Fine", DataType::Void);
        microflow
            .objects
            .push(factory.create_variable(DataType::Integer, "Count", "0"));
        assert_eq!(recolor(&mut microflow), 0);
    }
}
