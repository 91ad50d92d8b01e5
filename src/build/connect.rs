//! Edge connector.

use crate::microflow::{CaseValue, ConnectorPosition, Microflow, ObjectId, SequenceFlow};

/// How a sequence flow attaches to its endpoints. Defaults to leaving on the
/// right and entering on the left, without a case value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub origin: ConnectorPosition,
    pub destination: ConnectorPosition,
    pub case_value: Option<CaseValue>,
}

impl Default for Link {
    fn default() -> Self {
        Link {
            origin: ConnectorPosition::Right,
            destination: ConnectorPosition::Left,
            case_value: None,
        }
    }
}

impl Link {
    pub fn ports(origin: ConnectorPosition, destination: ConnectorPosition) -> Self {
        Link {
            origin,
            destination,
            case_value: None,
        }
    }

    pub fn with_case(mut self, case_value: CaseValue) -> Self {
        self.case_value = Some(case_value);
        self
    }
}

/// Append a flow from `origin` to `destination`. No de-duplication: two
/// calls with the same arguments yield two parallel flows.
pub fn connect<'a>(
    microflow: &'a mut Microflow,
    origin: ObjectId,
    destination: ObjectId,
    link: Link,
) -> &'a SequenceFlow {
    microflow.flows.push(SequenceFlow {
        origin,
        destination,
        origin_connection: link.origin,
        destination_connection: link.destination,
        case_value: link.case_value,
    });
    &microflow.flows[microflow.flows.len() - 1]
}
