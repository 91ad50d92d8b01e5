//! Structural invariant validation for microflows.
//!
//! Every generated microflow is checked here before it is handed to the
//! working copy. Existing microflows can be checked the same way.

use std::collections::HashSet;

use petgraph::algo::is_cyclic_directed;

use super::graph::FlowGraph;
use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    /// The object where the error was found, if applicable.
    pub object_id: Option<ObjectId>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.object_id {
            Some(id) => write!(f, "[{}] {} (at object {})", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Validate a microflow against all structural invariants. Returns all errors found.
pub fn validate_microflow(microflow: &Microflow) -> Vec<ValidationError> {
    let graph = FlowGraph::build(microflow);
    let mut errors = Vec::new();

    m001_exactly_one_start(microflow, &mut errors);
    m002_start_has_no_incoming(microflow, &graph, &mut errors);
    m003_flows_reference_objects(&graph, &mut errors);
    m004_no_orphans(microflow, &graph, &mut errors);
    m005_split_has_true_and_false(microflow, &graph, &mut errors);
    m006_split_reconverges(microflow, &graph, &mut errors);
    m007_end_has_no_outgoing(microflow, &graph, &mut errors);
    m008_no_cycles(&graph, &mut errors);
    m009_case_only_on_split(microflow, &mut errors);
    m010_parameters_unconnected(microflow, &graph, &mut errors);
    m011_no_dead_ends(microflow, &graph, &mut errors);

    errors
}

fn m001_exactly_one_start(microflow: &Microflow, errors: &mut Vec<ValidationError>) {
    let count = microflow.objects.iter().filter(|o| o.is_start()).count();
    if count != 1 {
        errors.push(ValidationError {
            code: "M001",
            message: format!("Microflow must have exactly 1 start event, found {count}"),
            object_id: None,
        });
    }
}

fn m002_start_has_no_incoming(
    microflow: &Microflow,
    graph: &FlowGraph,
    errors: &mut Vec<ValidationError>,
) {
    for start in microflow.objects.iter().filter(|o| o.is_start()) {
        if graph.incoming_count(start.id) > 0 {
            errors.push(ValidationError {
                code: "M002",
                message: "Start event must not have incoming flows".into(),
                object_id: Some(start.id),
            });
        }
    }
}

fn m003_flows_reference_objects(graph: &FlowGraph, errors: &mut Vec<ValidationError>) {
    for (origin, destination) in &graph.dangling {
        errors.push(ValidationError {
            code: "M003",
            message: format!("Flow {origin} -> {destination} references an unknown object"),
            object_id: None,
        });
    }
}

fn m004_no_orphans(microflow: &Microflow, graph: &FlowGraph, errors: &mut Vec<ValidationError>) {
    for object in &microflow.objects {
        if object.is_start() || object.is_parameter() {
            continue;
        }
        if graph.incoming_count(object.id) == 0 {
            errors.push(ValidationError {
                code: "M004",
                message: "Object has no incoming flow".into(),
                object_id: Some(object.id),
            });
        }
    }
}

fn m005_split_has_true_and_false(
    microflow: &Microflow,
    graph: &FlowGraph,
    errors: &mut Vec<ValidationError>,
) {
    for split in microflow.objects.iter().filter(|o| o.is_split()) {
        let outgoing = graph.outgoing(split.id);
        let cases: Vec<Option<&str>> = outgoing
            .iter()
            .map(|(_, label)| label.case_value.as_ref().map(CaseValue::as_str))
            .collect();
        let has_true = cases.contains(&Some("true"));
        let has_false = cases.contains(&Some("false"));
        if outgoing.len() != 2 || !has_true || !has_false {
            errors.push(ValidationError {
                code: "M005",
                message: format!(
                    "Exclusive split must have exactly a 'true' and a 'false' flow, found {:?}",
                    cases
                ),
                object_id: Some(split.id),
            });
        }
    }
}

fn m006_split_reconverges(
    microflow: &Microflow,
    graph: &FlowGraph,
    errors: &mut Vec<ValidationError>,
) {
    let merges: HashSet<ObjectId> = microflow
        .objects
        .iter()
        .filter(|o| o.is_merge())
        .map(|o| o.id)
        .collect();

    for split in microflow.objects.iter().filter(|o| o.is_split()) {
        let target = |case: bool| {
            graph
                .outgoing(split.id)
                .into_iter()
                .find(|(_, label)| label.case_value == Some(CaseValue::boolean(case)))
                .map(|(id, _)| id)
        };
        // Missing cases are reported by M005.
        let (Some(true_target), Some(false_target)) = (target(true), target(false)) else {
            continue;
        };

        let true_reachable = graph.reachable_from(true_target);
        let false_reachable = graph.reachable_from(false_target);
        let reconverges = merges
            .iter()
            .any(|m| true_reachable.contains(m) && false_reachable.contains(m));
        if !reconverges {
            errors.push(ValidationError {
                code: "M006",
                message: "Branches of exclusive split never reach a common merge".into(),
                object_id: Some(split.id),
            });
        }
    }
}

fn m007_end_has_no_outgoing(
    microflow: &Microflow,
    graph: &FlowGraph,
    errors: &mut Vec<ValidationError>,
) {
    for end in microflow.objects.iter().filter(|o| o.is_end()) {
        if graph.outgoing_count(end.id) > 0 {
            errors.push(ValidationError {
                code: "M007",
                message: "End event must not have outgoing flows".into(),
                object_id: Some(end.id),
            });
        }
    }
}

fn m008_no_cycles(graph: &FlowGraph, errors: &mut Vec<ValidationError>) {
    if is_cyclic_directed(&graph.graph) {
        errors.push(ValidationError {
            code: "M008",
            message: "Microflow contains a cycle".into(),
            object_id: None,
        });
    }
}

fn m009_case_only_on_split(microflow: &Microflow, errors: &mut Vec<ValidationError>) {
    for flow in microflow.flows.iter().filter(|f| f.case_value.is_some()) {
        let from_split = microflow
            .object(flow.origin)
            .map(MicroflowObject::is_split)
            .unwrap_or(false);
        if !from_split {
            errors.push(ValidationError {
                code: "M009",
                message: format!(
                    "Flow {} -> {} carries a case value but does not leave a split",
                    flow.origin, flow.destination
                ),
                object_id: Some(flow.origin),
            });
        }
    }
}

fn m010_parameters_unconnected(
    microflow: &Microflow,
    graph: &FlowGraph,
    errors: &mut Vec<ValidationError>,
) {
    for parameter in microflow.parameters() {
        if graph.incoming_count(parameter.id) + graph.outgoing_count(parameter.id) > 0 {
            errors.push(ValidationError {
                code: "M010",
                message: "Parameters are not part of the control flow".into(),
                object_id: Some(parameter.id),
            });
        }
    }
}

fn m011_no_dead_ends(microflow: &Microflow, graph: &FlowGraph, errors: &mut Vec<ValidationError>) {
    for object in &microflow.objects {
        if object.is_end() || object.is_parameter() {
            continue;
        }
        if graph.outgoing_count(object.id) == 0 {
            errors.push(ValidationError {
                code: "M011",
                message: "Object has no outgoing flow".into(),
                object_id: Some(object.id),
            });
        }
    }
}
