#![forbid(unsafe_code)]
//! deptrim-core library.
//!
//! A directed dependency graph over build units (projects and the external
//! artifacts they pull in), plus the machinery to apply per-project
//! dependency advice to a set of such graphs and report what the build would
//! look like if every piece of advice were followed.
//!
//! ## Pipeline
//!
//! ```text
//! per-project snapshots (JSON)
//!        ↓  provider::LazyGraphCache
//! DependencyGraph per project
//!        ↓  trim::GraphTrimmer (add edges, remove edges, prune orphans)
//! trimmed DependencyGraph per project
//!        ↓  trim::merge_all
//! build-wide trimmed graph
//!        ↓  metrics::GraphMetrics::from_graphs
//! node/edge deltas
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Library operations return [`error::GraphError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod advice;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod provider;
pub mod query;
pub mod snapshot;
pub mod trim;

pub use advice::{AdviceKind, Dependency, DependencyAdvice, ProjectAdvice};
pub use error::GraphError;
pub use graph::{DependencyGraph, Edge, Node};
pub use metrics::{GraphMetrics, GraphSize};
pub use provider::{LazyGraphCache, ProjectGraphProvider};
pub use query::reverse_dependents;
pub use trim::{GraphTrimmer, merge_all, trim_project};
