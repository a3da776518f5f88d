//! The dependency graph ADT.
//!
//! # Overview
//!
//! [`DependencyGraph`] stores nodes and edges in a petgraph [`DiGraph`] and
//! keys every node by its identifier string. An edge `A → B` means
//! "A depends on B".
//!
//! ## Invariants
//!
//! - Every edge endpoint is a registered node, even leaves.
//! - Isolated nodes (no edges at all) are representable.
//! - No parallel edges: at most one edge per `(from, to)` pair, whatever
//!   the weight. The first insertion wins.
//! - `edge_count` equals the number of stored edges and the sum of all
//!   in-degrees. [`DependencyGraph::check_consistency`] re-derives both.
//! - Iteration follows insertion order, so output is deterministic for a
//!   given graph instance.
//!
//! ## Equality
//!
//! Two graphs are equal when they register the same node identifiers and,
//! per node, their sorted outgoing edge lists match. Insertion order does
//! not matter. There is deliberately no `Hash` impl: this is a large,
//! mutable aggregate and must not be used as a key in hashed collections.
//!
//! ## Derived graphs
//!
//! `copy`, `reversed`, `subgraph`, `remove_edge` and `remove_edges` all build
//! a brand-new graph by replaying nodes and edges; the result shares no state
//! with the source.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;

use super::search::DepthFirstSearch;
use super::{Edge, Node};
use crate::error::GraphError;

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// A directed dependency graph over build units.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Directed graph: node weights are canonical nodes, edge weights are
    /// the opaque edge weights.
    graph: DiGraph<Node, u32>,
    /// Mapping from node identifier to petgraph `NodeIndex`.
    node_map: HashMap<String, NodeIndex>,
    /// Incoming edge count per node, indexed by `NodeIndex`.
    in_degree: Vec<usize>,
    edge_count: usize,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph by inserting `edges` in order.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge(edge);
        }
        graph
    }

    // -- mutation -----------------------------------------------------------

    /// Register `node` if absent. Returns `true` if it was newly added.
    ///
    /// The first instance registered for an identifier stays canonical.
    pub fn add_node(&mut self, node: impl Into<Node>) -> bool {
        let node = node.into();
        let fresh = !self.node_map.contains_key(node.identifier());
        self.intern(node);
        fresh
    }

    /// Insert `from → to` with the default weight.
    ///
    /// Returns `true` if a new edge was stored. Both endpoints are registered
    /// either way.
    pub fn add_edge(&mut self, from: impl Into<Node>, to: impl Into<Node>) -> bool {
        self.insert_edge(Edge::new(from, to))
    }

    /// Insert `from → to` carrying `weight`.
    pub fn add_weighted_edge(
        &mut self,
        from: impl Into<Node>,
        to: impl Into<Node>,
        weight: u32,
    ) -> bool {
        self.insert_edge(Edge::with_weight(from, to, weight))
    }

    /// Insert `edge` unless an edge with the same endpoints already exists.
    pub fn insert_edge(&mut self, edge: Edge) -> bool {
        let Edge { from, to, weight } = edge;
        let source = self.intern(from);
        let target = self.intern(to);

        // petgraph allows parallel edges; this graph does not.
        if self.graph.contains_edge(source, target) {
            return false;
        }

        self.graph.add_edge(source, target, weight);
        self.in_degree[target.index()] += 1;
        self.edge_count += 1;
        true
    }

    /// Union `other` into `self`: every node and edge of `other` is inserted.
    pub fn merge(&mut self, other: &Self) {
        for node in other.nodes() {
            self.add_node(node);
        }
        for edge in other.edges() {
            self.insert_edge(edge);
        }
    }

    // -- queries ------------------------------------------------------------

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn has_node(&self, identifier: &str) -> bool {
        self.node_map.contains_key(identifier)
    }

    /// Look up the canonical node registered for `identifier`.
    #[must_use]
    pub fn node(&self, identifier: &str) -> Option<&Node> {
        self.node_map.get(identifier).map(|&idx| &self.graph[idx])
    }

    /// Number of edges pointing at `identifier`, if it is registered.
    #[must_use]
    pub fn in_degree(&self, identifier: &str) -> Option<usize> {
        self.node_map
            .get(identifier)
            .map(|idx| self.in_degree[idx.index()])
    }

    /// Outgoing edges of `identifier`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingNode`] if `identifier` was never
    /// registered via [`add_node`](Self::add_node) or an edge insertion.
    pub fn adj(&self, identifier: &str) -> Result<Vec<Edge>, GraphError> {
        let idx = self.index_of(identifier)?;
        Ok(self.outgoing(idx).map(|(_, edge)| edge).collect())
    }

    /// All registered nodes, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_weights()
    }

    /// All edges, grouped by source node in registration order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.graph
            .node_indices()
            .flat_map(|idx| self.outgoing(idx).map(|(_, edge)| edge))
            .collect()
    }

    /// Nodes with no incoming and no outgoing edges.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.in_degree[idx.index()] == 0
                    && self.graph.edges(idx).next().is_none()
            })
            .map(|idx| &self.graph[idx])
    }

    /// The unique node with in-degree 0.
    ///
    /// Isolated nodes also have in-degree 0, so a graph with disconnected
    /// components has no unique root. This never guesses.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingRoot`] when zero or several nodes have
    /// in-degree 0.
    pub fn root_node(&self) -> Result<&Node, GraphError> {
        let roots: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| self.in_degree[idx.index()] == 0)
            .collect();

        match roots.as_slice() {
            [root] => Ok(&self.graph[*root]),
            _ => Err(GraphError::MissingRoot {
                candidates: roots.len(),
            }),
        }
    }

    // -- derived graphs -----------------------------------------------------

    /// A fresh graph built by replaying every node and edge.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.replay(|_| true)
    }

    /// Every edge `a → b` becomes `b → a`. Isolated nodes are kept.
    ///
    /// Answers "what depends on this node".
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut reversed = Self::new();
        for node in self.nodes() {
            reversed.add_node(node);
        }
        for edge in self.edges() {
            reversed.insert_edge(edge.reversed());
        }
        reversed
    }

    /// Everything reachable from `root` by following edges forward.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingNode`] if `root` is not registered.
    pub fn subgraph(&self, root: &str) -> Result<Self, GraphError> {
        DepthFirstSearch::new(self, root).map(DepthFirstSearch::into_subgraph)
    }

    /// A copy without the edge `from → to`. Both endpoints stay registered.
    #[must_use]
    pub fn remove_edge(&self, from: &str, to: &str) -> Self {
        let mut graph = self.replay(|edge| !edge.connects(from, to));
        graph.add_node(self.node_or_parse(from));
        graph.add_node(self.node_or_parse(to));
        graph
    }

    /// A copy without any edge listed in `pairs`, pruned to what is still
    /// reachable from `root`.
    ///
    /// Removing an edge can orphan a whole downstream subtree; the pruning
    /// step drops it. With no pairs this is a plain [`copy`](Self::copy) and
    /// `root` is not looked up.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingNode`] if `pairs` is non-empty and `root`
    /// is not registered.
    pub fn remove_edges<F, T>(&self, root: &str, pairs: &[(F, T)]) -> Result<Self, GraphError>
    where
        F: AsRef<str>,
        T: AsRef<str>,
    {
        if pairs.is_empty() {
            return Ok(self.copy());
        }

        self.replay(|edge| {
            !pairs
                .iter()
                .any(|(from, to)| edge.connects(from.as_ref(), to.as_ref()))
        })
        .subgraph(root)
    }

    // -- validation ---------------------------------------------------------

    /// Re-derive in-degrees and the edge count from the raw edge set and
    /// compare them with the maintained counters.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Inconsistent`] describing the first mismatch.
    pub fn check_consistency(&self) -> Result<(), GraphError> {
        let inconsistent = |detail: String| Err(GraphError::Inconsistent { detail });

        if self.node_map.len() != self.graph.node_count() {
            return inconsistent(format!(
                "{} identifiers for {} nodes",
                self.node_map.len(),
                self.graph.node_count()
            ));
        }
        for (identifier, idx) in &self.node_map {
            if self.graph[*idx].identifier() != identifier.as_str() {
                return inconsistent(format!("identifier {identifier} maps to the wrong node"));
            }
        }

        let mut derived = vec![0usize; self.graph.node_count()];
        let mut pairs = HashSet::new();
        for edge in self.graph.edge_references() {
            derived[edge.target().index()] += 1;
            if !pairs.insert((edge.source(), edge.target())) {
                return inconsistent(format!(
                    "parallel edge {} -> {}",
                    self.graph[edge.source()],
                    self.graph[edge.target()]
                ));
            }
        }

        if self.edge_count != pairs.len() {
            return inconsistent(format!(
                "edge count {} but {} edges stored",
                self.edge_count,
                pairs.len()
            ));
        }
        if derived != self.in_degree {
            return inconsistent("in-degree counters do not match edges".to_string());
        }
        let in_degree_sum: usize = self.in_degree.iter().sum();
        if in_degree_sum != self.edge_count {
            return inconsistent(format!(
                "in-degree sum {in_degree_sum} != edge count {}",
                self.edge_count
            ));
        }
        Ok(())
    }

    // -- internals ----------------------------------------------------------

    pub(crate) fn index_of(&self, identifier: &str) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(identifier)
            .copied()
            .ok_or_else(|| GraphError::missing_node(identifier))
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Outgoing edges of `idx` with their target index, in insertion order.
    pub(crate) fn outgoing(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, Edge)> + '_ {
        let mut refs: Vec<EdgeReference<'_, u32>> = self.graph.edges(idx).collect();
        refs.sort_by_key(|edge| edge.id());
        refs.into_iter()
            .map(|edge| (edge.target(), self.edge_from_ref(edge)))
    }

    fn edge_from_ref(&self, edge: EdgeReference<'_, u32>) -> Edge {
        Edge {
            from: self.graph[edge.source()].clone(),
            to: self.graph[edge.target()].clone(),
            weight: *edge.weight(),
        }
    }

    fn intern(&mut self, node: Node) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(node.identifier()) {
            return idx;
        }
        let identifier = node.identifier().to_string();
        let idx = self.graph.add_node(node);
        self.node_map.insert(identifier, idx);
        self.in_degree.push(0);
        idx
    }

    fn node_or_parse(&self, identifier: &str) -> Node {
        self.node(identifier)
            .cloned()
            .unwrap_or_else(|| Node::parse(identifier))
    }

    /// Every node, then every edge accepted by `keep`, into a new graph.
    fn replay(&self, mut keep: impl FnMut(&Edge) -> bool) -> Self {
        let mut graph = Self::new();
        for node in self.nodes() {
            graph.add_node(node);
        }
        for edge in self.edges() {
            if keep(&edge) {
                graph.insert_edge(edge);
            }
        }
        graph
    }

    fn sorted_adj(&self, idx: NodeIndex) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.outgoing(idx).map(|(_, edge)| edge).collect();
        edges.sort();
        edges
    }
}

impl PartialEq for DependencyGraph {
    fn eq(&self, other: &Self) -> bool {
        if self.node_count() != other.node_count() || self.edge_count != other.edge_count {
            return false;
        }

        self.node_map.iter().all(|(identifier, &idx)| {
            other.node_map.get(identifier).is_some_and(|&other_idx| {
                self.graph[idx] == other.graph[other_idx]
                    && self.sorted_adj(idx) == other.sorted_adj(other_idx)
            })
        })
    }
}

impl Eq for DependencyGraph {}

impl fmt::Display for DependencyGraph {
    /// One `from -> to` line per edge.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in self.edges().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{edge}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
