//! Before/after size comparison for a trimmed graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;

/// Node and edge counts of one graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSize {
    pub node_count: usize,
    pub edge_count: usize,
}

impl From<&DependencyGraph> for GraphSize {
    fn from(graph: &DependencyGraph) -> Self {
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        }
    }
}

/// Size of a graph before and after following advice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub original: GraphSize,
    pub trimmed: GraphSize,
}

impl GraphMetrics {
    #[must_use]
    pub fn from_graphs(original: &DependencyGraph, trimmed: &DependencyGraph) -> Self {
        Self {
            original: original.into(),
            trimmed: trimmed.into(),
        }
    }

    /// `trimmed - original` node count. Negative when advice shrinks the graph.
    #[must_use]
    pub fn node_delta(&self) -> i64 {
        signed(self.trimmed.node_count) - signed(self.original.node_count)
    }

    /// `trimmed - original` edge count.
    #[must_use]
    pub fn edge_delta(&self) -> i64 {
        signed(self.trimmed.edge_count) - signed(self.original.edge_count)
    }

    /// One-sentence human summary of the comparison.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Current graph has {} nodes and {} edges. If you follow all of this advice, \
             the new graph will have {} nodes and {} edges.",
            self.original.node_count,
            self.original.edge_count,
            self.trimmed.node_count,
            self.trimmed.edge_count,
        )
    }
}

impl fmt::Display for GraphMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

fn signed(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
