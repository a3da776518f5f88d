//! Depth-first reachability over a [`DependencyGraph`].
//!
//! # Design
//!
//! - **Forward only**: edges are followed from dependent to dependency.
//! - **Induced, not spanning**: every edge leaving a visited node is
//!   recorded, including edges into nodes that were already visited, so
//!   diamonds in the dependency lattice survive extraction.
//! - **Iterative**: an explicit stack replaces recursion so deep chains
//!   cannot overflow the call stack. Traversal order affects only the
//!   internal ordering of the result, never its node or edge set.
//! - **O(V+E)**: each reachable node is expanded once.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use super::DependencyGraph;
use crate::error::GraphError;

/// The subgraph of `graph` reachable from a root node.
#[derive(Debug)]
pub struct DepthFirstSearch {
    visited: HashSet<NodeIndex>,
    subgraph: DependencyGraph,
}

impl DepthFirstSearch {
    /// Walk `graph` from `root`.
    ///
    /// A root with no outgoing edges yields a single-node subgraph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingNode`] if `root` is not registered.
    pub fn new(graph: &DependencyGraph, root: &str) -> Result<Self, GraphError> {
        let root_idx = graph.index_of(root)?;

        let mut subgraph = DependencyGraph::new();
        subgraph.add_node(graph.node_at(root_idx));

        let mut visited = HashSet::from([root_idx]);
        let mut stack = vec![root_idx];

        while let Some(idx) = stack.pop() {
            for (target, edge) in graph.outgoing(idx) {
                subgraph.insert_edge(edge);
                if visited.insert(target) {
                    stack.push(target);
                }
            }
        }

        Ok(Self { visited, subgraph })
    }

    /// Number of nodes reached, the root included.
    #[must_use]
    pub fn reached(&self) -> usize {
        self.visited.len()
    }

    #[must_use]
    pub const fn subgraph(&self) -> &DependencyGraph {
        &self.subgraph
    }

    #[must_use]
    pub fn into_subgraph(self) -> DependencyGraph {
        self.subgraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn graph_from(pairs: &[(&str, &str)]) -> DependencyGraph {
        DependencyGraph::from_edges(pairs.iter().map(|(a, b)| Edge::new(*a, *b)))
    }

    fn sorted_ids(graph: &DependencyGraph) -> Vec<String> {
        let mut ids: Vec<String> = graph.nodes().map(|n| n.identifier().to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn isolated_root_yields_single_node() {
        let mut graph = graph_from(&[("a", "b")]);
        graph.add_node("solo");
        let search = DepthFirstSearch::new(&graph, "solo").expect("solo registered");
        assert_eq!(search.reached(), 1);
        assert_eq!(sorted_ids(search.subgraph()), ["solo"]);
        assert_eq!(search.subgraph().edge_count(), 0);
    }

    #[test]
    fn leaf_root_yields_single_node() {
        let graph = graph_from(&[("a", "b")]);
        let sub = graph.subgraph("b").expect("b registered");
        assert_eq!(sorted_ids(&sub), ["b"]);
    }

    #[test]
    fn missing_root_fails() {
        let graph = graph_from(&[("a", "b")]);
        assert!(matches!(
            DepthFirstSearch::new(&graph, "nope"),
            Err(GraphError::MissingNode { .. })
        ));
    }

    #[test]
    fn diamond_keeps_converging_edges() {
        let graph = graph_from(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let sub = graph.subgraph("a").expect("a registered");
        assert_eq!(sub, graph);
    }

    #[test]
    fn excludes_upstream_and_unrelated_nodes() {
        let graph = graph_from(&[
            (":app", ":lib"),
            (":lib", "okio"),
            (":other", "moshi"),
        ]);
        let sub = graph.subgraph(":lib").expect(":lib registered");
        assert_eq!(sub, graph_from(&[(":lib", "okio")]));
    }

    #[test]
    fn cycles_terminate() {
        let graph = graph_from(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
        let sub = graph.subgraph("b").expect("b registered");
        assert_eq!(sub, graph);
    }

    #[test]
    fn keeps_canonical_node_kinds_and_weights() {
        let mut graph = DependencyGraph::new();
        graph.add_weighted_edge(Node::project(":app"), Node::bare("okio"), 9);
        let sub = graph.subgraph(":app").expect(":app registered");
        assert!(sub.node(":app").is_some_and(Node::is_project));
        assert_eq!(sub.adj(":app").expect("registered")[0].weight, 9);
    }
}
