//! Validation of registered content against the loader contract.

use crate::{
    error::{ValidationError, ValidationErrorKind},
    graph::{resolve_reference, GraphSet, Location},
    line::ChoiceTarget,
};

/// Walk every owned graph and accumulate all content defects.
///
/// Every defect is collected before reporting so that a loader can surface
/// the full list at once instead of fixing them one re-run at a time.
pub(crate) fn validate_graph_set(graphs: &GraphSet) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for (graph_name, graph) in graphs.iter() {
        if graph.is_empty() {
            errors.push(ValidationErrorKind::EmptyGraph {
                graph: graph_name.to_string(),
            });
        }

        for node in graph.nodes() {
            let at = Location::new(graph_name, &node.name);

            if node.choices.is_empty() {
                errors.push(ValidationErrorKind::NodeWithoutChoices { at: at.clone() });
            }

            for choice in &node.choices {
                if let ChoiceTarget::Jump(reference) = &choice.target {
                    if resolve_reference(reference, &at, graphs).is_err() {
                        errors.push(ValidationErrorKind::UnresolvableReference {
                            from: at.clone(),
                            reference: reference.clone(),
                        });
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}
