//! Nodes, graphs and the graph-of-graphs registry.

use crate::{
    error::{RuntimeError, ValidationError, ValidationErrorKind},
    graph::{validate::validate_graph_set, Location},
    line::{ChoiceDef, Line},
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::collections::{HashMap, HashSet};

/// Convenience type for the nodes of a graph, keyed by node name.
pub type NodeMap = HashMap<String, Node>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A unit of conversation: lines to show, choices to offer.
pub struct Node {
    /// Name, unique within its graph.
    pub name: String,
    /// Prompt emitted in full, in order, before choices are evaluated.
    pub lines: Vec<Line>,
    /// Branches out of the node, in display and resolution priority order.
    pub choices: Vec<ChoiceDef>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A single named conversation graph.
///
/// Graphs are built once by a loader and read-only thereafter.
pub struct Graph {
    nodes: NodeMap,
}

impl Graph {
    /// Start building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder { nodes: Vec::new() }
    }

    /// Retrieve a node by name.
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Whether the graph contains a node with the given name.
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Iterate over the nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Registry of every conversation graph a session can traverse.
///
/// Owned graphs are registered under a path-like name (`"town"`,
/// `"combat/arena"`). Graphs owned by another subsystem are registered as
/// external: jumps into them resolve to a handoff instead of being followed.
pub struct GraphSet {
    graphs: HashMap<String, Graph>,
    external: HashSet<String>,
}

impl GraphSet {
    /// Create an empty registry.
    pub fn new() -> Self {
        GraphSet::default()
    }

    /// Register an owned graph under the given name.
    ///
    /// A graph registered under a name that is already taken replaces the
    /// earlier graph.
    pub fn register(&mut self, name: &str, graph: Graph) {
        self.graphs.insert(name.to_string(), graph);
    }

    /// Register the name of a graph owned by another subsystem.
    ///
    /// Jump references into it resolve without node existence checking: the
    /// other subsystem owns that namespace.
    pub fn register_external(&mut self, name: &str) {
        self.external.insert(name.to_string());
    }

    /// Retrieve an owned graph by name.
    pub fn get_graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.get(name)
    }

    /// Whether the name is registered as an external graph.
    pub fn is_external(&self, name: &str) -> bool {
        self.external.contains(name)
    }

    /// Iterate over the owned graphs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Graph)> {
        self.graphs.iter().map(|(name, graph)| (name.as_str(), graph))
    }

    /// Check every owned graph for content defects, accumulating all of them.
    ///
    /// Loaders call this once after registering their graphs. The session
    /// guards against the same defects at runtime regardless, since
    /// validation is optional.
    ///
    /// # Errors
    /// *   [`ValidationError`][crate::error::ValidationError]: with every
    ///     defect found: nodes without choices, empty graphs and jump
    ///     references which resolve to nothing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_graph_set(self)
    }

    /// Retrieve the node at a fully resolved location.
    pub(crate) fn get_node(&self, location: &Location) -> Result<&Node, RuntimeError> {
        self.graphs
            .get(&location.graph)
            .and_then(|graph| graph.get_node(&location.node))
            .ok_or_else(|| RuntimeError::UnknownNode {
                reference: location.to_string(),
                from: location.clone(),
            })
    }
}

/// Builder for a [`Graph`], collecting nodes from a loader.
pub struct GraphBuilder {
    nodes: Vec<Node>,
}

impl GraphBuilder {
    /// Add a node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Finish the graph.
    ///
    /// # Errors
    /// *   [`ValidationError`][crate::error::ValidationError]: if two added
    ///     nodes share a name. Every collision is reported.
    pub fn build(self) -> Result<Graph, ValidationError> {
        let mut nodes = NodeMap::new();
        let mut errors = Vec::new();

        for node in self.nodes.into_iter() {
            if nodes.contains_key(&node.name) {
                errors.push(ValidationErrorKind::DuplicateNode {
                    node: node.name.clone(),
                });
            }

            nodes.insert(node.name.clone(), node);
        }

        if errors.is_empty() {
            Ok(Graph { nodes })
        } else {
            Err(ValidationError { errors })
        }
    }
}

/// Builder for a [`Node`].
pub struct NodeBuilder {
    name: String,
    lines: Vec<Line>,
    choices: Vec<ChoiceDef>,
}

impl NodeBuilder {
    /// Start building a node with the given name.
    pub fn new(name: &str) -> Self {
        NodeBuilder {
            name: name.to_string(),
            lines: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Add a prompt line.
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Add a choice. Order of addition is display and resolution order.
    pub fn with_choice(mut self, choice: ChoiceDef) -> Self {
        self.choices.push(choice);
        self
    }

    /// Finish the node.
    pub fn build(self) -> Node {
        Node {
            name: self.name,
            lines: self.lines,
            choices: self.choices,
        }
    }
}
