//! Dependency graph module.
//!
//! # Overview
//!
//! Leaves first:
//!
//! ```text
//! Node / Edge              identity primitives (node.rs, edge.rs)
//!        ↓
//! DependencyGraph          storage, mutation, set algebra (dependency.rs)
//!        ↓
//! DepthFirstSearch         forward reachability (search.rs)
//!        ↓
//! to_dot                   deterministic text rendering (dot.rs)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use deptrim_core::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_edge(":app", ":lib");
//! graph.add_edge(":lib", "okio");
//!
//! let pruned = graph.remove_edges(":app", &[(":app", ":lib")]).unwrap();
//! assert_eq!(pruned.node_count(), 1);
//! ```

pub mod dependency;
pub mod dot;
pub mod edge;
pub mod node;
pub mod search;

// Re-export primary types at module level for convenience.
pub use dependency::DependencyGraph;
pub use dot::to_dot;
pub use edge::{DEFAULT_WEIGHT, Edge};
pub use node::Node;
pub use search::DepthFirstSearch;
