//! JSON graph snapshots.
//!
//! A snapshot is the on-disk shape of a [`DependencyGraph`]:
//!
//! ```json
//! {
//!   "edges": [{ "from": ":app", "to": ":lib", "weight": 1 }],
//!   "nodes": [":orphan"]
//! }
//! ```
//!
//! `nodes` only lists isolated nodes; everything else is implied by an edge.
//! Decoding replays edges and nodes through the graph's own insertion
//! methods, so in-degrees and the edge count are always re-derived rather
//! than trusted from the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::{DEFAULT_WEIGHT, DependencyGraph, Edge, Node};

/// Serialized form of one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

const fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

/// Serialized form of a whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    /// Isolated node identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
}

impl From<&DependencyGraph> for GraphSnapshot {
    fn from(graph: &DependencyGraph) -> Self {
        let edges = graph
            .edges()
            .into_iter()
            .map(|edge| EdgeRecord {
                from: edge.from.identifier().to_string(),
                to: edge.to.identifier().to_string(),
                weight: edge.weight,
            })
            .collect();
        let nodes = graph
            .isolated_nodes()
            .map(|node| node.identifier().to_string())
            .collect();
        Self { edges, nodes }
    }
}

impl From<GraphSnapshot> for DependencyGraph {
    fn from(snapshot: GraphSnapshot) -> Self {
        let mut graph = Self::new();
        for record in snapshot.edges {
            graph.insert_edge(Edge::with_weight(
                Node::parse(&record.from),
                Node::parse(&record.to),
                record.weight,
            ));
        }
        for identifier in snapshot.nodes {
            graph.add_node(Node::parse(&identifier));
        }
        graph
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphSnapshot::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DependencyGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        GraphSnapshot::deserialize(deserializer).map(Self::from)
    }
}

/// Encode `graph` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`GraphError::Json`] if serialization fails.
pub fn to_json(graph: &DependencyGraph) -> Result<String, GraphError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Decode a graph from JSON.
///
/// # Errors
///
/// Returns [`GraphError::Json`] if `json` is not a valid snapshot.
pub fn from_json(json: &str) -> Result<DependencyGraph, GraphError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a snapshot file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be read and
/// [`GraphError::Json`] if it is malformed.
#[instrument]
pub fn read_file(path: &Path) -> Result<DependencyGraph, GraphError> {
    let content = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = from_json(&content)?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "decoded graph snapshot"
    );
    Ok(graph)
}

/// Encode `graph` and write it to `path`.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be written.
pub fn write_file(path: &Path, graph: &DependencyGraph) -> Result<(), GraphError> {
    let json = to_json(graph)?;
    fs::write(path, json).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_applies_default_weight() {
        let graph = from_json(r#"{"edges":[{"from":":app","to":":lib"}]}"#).expect("valid");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.adj(":app").expect("registered")[0].weight, 1);
        assert!(graph.node(":app").is_some_and(Node::is_project));
    }

    #[test]
    fn decode_rederives_aggregates() {
        let json = r#"{
            "edges": [
                {"from": "a", "to": "b"},
                {"from": "a", "to": "b", "weight": 4},
                {"from": "c", "to": "b"}
            ],
            "nodes": ["d", "a"]
        }"#;
        let graph = from_json(json).expect("valid");
        assert_eq!(graph.edge_count(), 2, "parallel edge dropped");
        assert_eq!(graph.in_degree("b"), Some(2));
        assert_eq!(graph.node_count(), 4);
        graph.check_consistency().expect("consistent");
    }

    #[test]
    fn encode_lists_only_isolated_nodes() {
        let mut graph = DependencyGraph::new();
        graph.add_weighted_edge(":app", "okio", 3);
        graph.add_node(":orphan");

        let snapshot = GraphSnapshot::from(&graph);
        assert_eq!(
            snapshot.edges,
            [EdgeRecord {
                from: ":app".to_string(),
                to: "okio".to_string(),
                weight: 3,
            }]
        );
        assert_eq!(snapshot.nodes, [":orphan"]);
    }

    #[test]
    fn empty_object_is_empty_graph() {
        let graph = from_json("{}").expect("valid");
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            from_json("{\"edges\": 3}"),
            Err(GraphError::Json { .. })
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("graph.json");

        let mut graph = DependencyGraph::new();
        graph.add_edge(":app", ":lib");
        graph.add_edge(":lib", "com.squareup.okio:okio:2.8.0");
        graph.add_node("lonely");

        write_file(&path, &graph).expect("write");
        let decoded = read_file(&path).expect("read");
        assert_eq!(decoded, graph);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
