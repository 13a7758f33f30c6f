//! Locations of nodes and resolution of jump references.

use crate::{consts::PATH_SEPARATOR, error::RuntimeError, graph::GraphSet};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Fully resolved position of a node: the graph it lives in plus its name.
///
/// # Examples
/// ```
/// # use parley::Location;
/// let location = Location::new("combat/arena", "first_blood");
///
/// assert_eq!(&location.to_string(), "combat/arena/first_blood");
/// ```
pub struct Location {
    /// Name the graph is registered under.
    pub graph: String,
    /// Node name within the graph.
    pub node: String,
}

impl Location {
    /// Create a location from its parts.
    pub fn new(graph: &str, node: &str) -> Self {
        Location {
            graph: graph.to_string(),
            node: node.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.graph, PATH_SEPARATOR, self.node)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Where a jump reference leads after resolution.
pub(crate) enum ResolvedTarget {
    /// Node in a graph owned by this registry.
    Internal(Location),
    /// Node in a graph registered as owned by another subsystem.
    External(Location),
}

/// Resolve a jump reference from the given location.
///
/// A reference without a path separator names a node in the current graph.
/// A reference with separators is split at the last one into a graph name
/// and a node name, resolved from the registry root. A graph name registered
/// as external resolves without node existence checking.
///
/// # Errors
/// *   [`UnknownNode`][crate::error::RuntimeError::UnknownNode]: if the
///     target does not exist. This is a content defect, fatal to the session.
pub(crate) fn resolve_reference(
    reference: &str,
    from: &Location,
    graphs: &GraphSet,
) -> Result<ResolvedTarget, RuntimeError> {
    let unknown = || RuntimeError::UnknownNode {
        reference: reference.to_string(),
        from: from.clone(),
    };

    match reference.rfind(PATH_SEPARATOR) {
        None => {
            let graph = graphs.get_graph(&from.graph).ok_or_else(unknown)?;

            if graph.contains_node(reference) {
                Ok(ResolvedTarget::Internal(Location::new(
                    &from.graph,
                    reference,
                )))
            } else {
                Err(unknown())
            }
        }
        Some(index) => {
            let (graph_name, node_name) = (&reference[..index], &reference[index + 1..]);

            if graphs.is_external(graph_name) {
                Ok(ResolvedTarget::External(Location::new(
                    graph_name, node_name,
                )))
            } else {
                let graph = graphs.get_graph(graph_name).ok_or_else(unknown)?;

                if graph.contains_node(node_name) {
                    Ok(ResolvedTarget::Internal(Location::new(
                        graph_name, node_name,
                    )))
                } else {
                    Err(unknown())
                }
            }
        }
    }
}
