//! Errors from validating registered content.

use crate::graph::Location;

use std::{error::Error, fmt};

impl Error for ValidationError {}

#[derive(Clone, Debug, PartialEq)]
/// Content defects found while validating a registry or building a graph.
///
/// Every defect is accumulated before reporting, so a loader sees the full
/// list in one pass.
pub struct ValidationError {
    /// All defects that were found.
    pub errors: Vec<ValidationErrorKind>,
}

#[derive(Clone, Debug, PartialEq)]
/// A single content defect.
pub enum ValidationErrorKind {
    /// Two nodes in one graph share a name.
    DuplicateNode { node: String },
    /// A graph was registered without any nodes.
    EmptyGraph { graph: String },
    /// A node carries no choices and can never be left.
    NodeWithoutChoices { at: Location },
    /// A jump reference resolves to neither a registered node nor an
    /// external graph.
    UnresolvableReference { from: Location, reference: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Found {} content defect(s):", self.errors.len())?;

        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }

        Ok(())
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ValidationErrorKind::*;

        match self {
            DuplicateNode { node } => {
                write!(f, "Duplicate node name '{}' in graph", node)
            }
            EmptyGraph { graph } => write!(f, "Graph '{}' was registered without nodes", graph),
            NodeWithoutChoices { at } => {
                write!(f, "Node '{}' carries no choices and can never be left", at)
            }
            UnresolvableReference { from, reference } => write!(
                f,
                "Jump reference '{}' at node '{}' resolves to nothing",
                reference, from
            ),
        }
    }
}
