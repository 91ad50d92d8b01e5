//! Microflow builder: appends factory-made objects to a microflow, places
//! them with the layout allocator and wires them with the edge connector.

use log::debug;

use super::connect::{Link, connect};
use super::factory::NodeFactory;
use super::layout::LayoutAllocator;
use crate::microflow::*;

pub struct MicroflowBuilder {
    microflow: Microflow,
    factory: NodeFactory,
    layout: LayoutAllocator,
}

impl MicroflowBuilder {
    /// Start a new microflow with default settings: concurrent execution
    /// allowed and an empty concurrency error message.
    pub fn new(name: impl Into<String>, return_type: DataType) -> Self {
        MicroflowBuilder {
            microflow: Microflow::new(name, return_type),
            factory: NodeFactory::new(),
            layout: LayoutAllocator::new(),
        }
    }

    /// Factory for the objects of this microflow.
    pub fn nodes(&mut self) -> &mut NodeFactory {
        &mut self.factory
    }

    pub fn microflow(&self) -> &Microflow {
        &self.microflow
    }

    pub fn layout(&self) -> &LayoutAllocator {
        &self.layout
    }

    /// Declare an input parameter on the parameter row.
    pub fn add_parameter(&mut self, name: impl Into<String>, variable_type: DataType) -> ObjectId {
        let mut parameter = self.factory.parameter(name, variable_type);
        parameter.position = self.layout.next_parameter();
        let id = parameter.id;
        self.microflow.objects.push(parameter);
        id
    }

    /// Append `object` offset by `(dx, dy)` from the previous placement and,
    /// when `from` is given, connect it from that object.
    pub fn add_object(
        &mut self,
        mut object: MicroflowObject,
        dx: i32,
        dy: i32,
        from: Option<(ObjectId, Link)>,
    ) -> ObjectId {
        object.position = self.layout.advance(dx, dy);
        let id = object.id;
        debug!(
            microflow = self.microflow.name.as_str(),
            object = id.0,
            x = object.position.x,
            y = object.position.y;
            "Placed object"
        );
        self.microflow.objects.push(object);
        if let Some((origin, link)) = from {
            self.connect(origin, id, link);
        }
        id
    }

    /// Append `object` after `from` with the default right-to-left link.
    pub fn append(&mut self, object: MicroflowObject, dx: i32, dy: i32, from: ObjectId) -> ObjectId {
        self.add_object(object, dx, dy, Some((from, Link::default())))
    }

    pub fn connect(&mut self, origin: ObjectId, destination: ObjectId, link: Link) -> &SequenceFlow {
        connect(&mut self.microflow, origin, destination, link)
    }

    pub fn finish(self) -> Microflow {
        self.microflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_objects_are_placed_and_connected() {
        let mut mf = MicroflowBuilder::new("Linear", DataType::Boolean);
        let start = mf.nodes().start_event();
        let start = mf.add_object(start, 0, 0, None);
        let end = mf.nodes().end_event("true");
        let end = mf.append(end, 100, 0, start);
        let microflow = mf.finish();

        assert_eq!(microflow.object(start).unwrap().position, Position::new(0, 100));
        assert_eq!(microflow.object(end).unwrap().position, Position::new(100, 100));
        assert_eq!(microflow.flows.len(), 1);
        assert_eq!(microflow.flows[0].origin, start);
        assert_eq!(microflow.flows[0].destination, end);
        assert!(microflow.allow_concurrent_execution);
    }
}
