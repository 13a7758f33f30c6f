//! Conversation graphs and the registry they are resolved from.

mod address;
mod graph;
mod validate;

pub use address::Location;
pub use graph::{Graph, GraphBuilder, GraphSet, Node, NodeBuilder, NodeMap};

pub(crate) use address::{resolve_reference, ResolvedTarget};
