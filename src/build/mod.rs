//! Microflow construction: node factory, layout, edge wiring, and the
//! generators built on top of them.

pub mod builder;
pub mod connect;
pub mod factory;
pub mod layout;
pub mod page_logging;
pub mod recolor;
pub mod validation;

pub use builder::MicroflowBuilder;
pub use connect::{Link, connect};
pub use factory::{NodeFactory, activity_color};
pub use layout::LayoutAllocator;
pub use page_logging::build_page_logging_microflow;
pub use recolor::recolor;
pub use validation::{ChainOutcome, SkippedAttribute, build_validation_microflow, split_expression};
