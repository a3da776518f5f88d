//! Reverse-dependency queries.

use tracing::debug;

use crate::error::GraphError;
use crate::graph::{DependencyGraph, Node};

/// Every project that depends on `identifier`, directly or transitively,
/// as a graph rooted at `identifier` with edges pointing from dependency to
/// dependent.
///
/// # Errors
///
/// Returns [`GraphError::NotAProject`] unless `identifier` names a project,
/// and [`GraphError::MissingNode`] if the project is not in `graph`.
pub fn reverse_dependents(
    graph: &DependencyGraph,
    identifier: &str,
) -> Result<DependencyGraph, GraphError> {
    let is_project = graph
        .node(identifier)
        .map_or_else(|| Node::parse(identifier).is_project(), Node::is_project);
    if !is_project {
        return Err(GraphError::NotAProject {
            identifier: identifier.to_string(),
        });
    }

    let dependents = graph.reversed().subgraph(identifier)?;
    debug!(
        identifier,
        dependents = dependents.node_count().saturating_sub(1),
        "reverse subgraph"
    );
    Ok(dependents)
}
