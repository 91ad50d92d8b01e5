//! petgraph-based directed graph view over a microflow's objects and flows.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};

use super::types::{CaseValue, ConnectorPosition, Microflow, ObjectId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLabel {
    pub origin_connection: ConnectorPosition,
    pub destination_connection: ConnectorPosition,
    pub case_value: Option<CaseValue>,
}

pub struct FlowGraph {
    pub graph: DiGraph<ObjectId, FlowLabel>,
    pub node_indices: HashMap<ObjectId, NodeIndex>,
    /// Flows whose origin or destination is not an object of the microflow.
    pub dangling: Vec<(ObjectId, ObjectId)>,
}

impl FlowGraph {
    pub fn build(microflow: &Microflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut dangling = Vec::new();

        for object in &microflow.objects {
            let idx = graph.add_node(object.id);
            node_indices.insert(object.id, idx);
        }

        for flow in &microflow.flows {
            match (
                node_indices.get(&flow.origin),
                node_indices.get(&flow.destination),
            ) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        FlowLabel {
                            origin_connection: flow.origin_connection,
                            destination_connection: flow.destination_connection,
                            case_value: flow.case_value.clone(),
                        },
                    );
                }
                _ => dangling.push((flow.origin, flow.destination)),
            }
        }

        FlowGraph {
            graph,
            node_indices,
            dangling,
        }
    }

    /// Outgoing flows as `(destination, label)`. Parallel flows are all returned.
    pub fn outgoing(&self, id: ObjectId) -> Vec<(ObjectId, &FlowLabel)> {
        let Some(&idx) = self.node_indices.get(&id) else {
            return vec![];
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (self.graph[e.target()], e.weight()))
            .collect()
    }

    pub fn incoming_count(&self, id: ObjectId) -> usize {
        let Some(&idx) = self.node_indices.get(&id) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Incoming)
            .count()
    }

    pub fn outgoing_count(&self, id: ObjectId) -> usize {
        let Some(&idx) = self.node_indices.get(&id) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .count()
    }

    /// Every object reachable from `start`, including `start` itself.
    pub fn reachable_from(&self, start: ObjectId) -> HashSet<ObjectId> {
        let mut reachable = HashSet::new();
        let Some(&idx) = self.node_indices.get(&start) else {
            return reachable;
        };
        let mut bfs = Bfs::new(&self.graph, idx);
        while let Some(nx) = bfs.next(&self.graph) {
            reachable.insert(self.graph[nx]);
        }
        reachable
    }
}
