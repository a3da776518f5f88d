//! Graphviz DOT rendering.
//!
//! One `"from" -> "to";` line per edge, edges in sorted order, followed by
//! one `"id";` line per isolated node so they are not lost from the picture.

use std::fmt::Write as FmtWrite;

use super::{DependencyGraph, Edge, Node};

/// Render `graph` as a strict DOT digraph.
#[must_use]
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut edges: Vec<Edge> = graph.edges();
    edges.sort();

    let mut isolated: Vec<&Node> = graph.isolated_nodes().collect();
    isolated.sort();

    let mut out = String::from("strict digraph DependencyGraph {\n");
    for edge in &edges {
        let _ = writeln!(
            out,
            "  {} -> {};",
            quote(edge.from.identifier()),
            quote(edge.to.identifier())
        );
    }
    for node in isolated {
        let _ = writeln!(out, "  {};", quote(node.identifier()));
    }
    out.push_str("}\n");
    out
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('\\', "\\\\").replace('"', "\\\""))
}
