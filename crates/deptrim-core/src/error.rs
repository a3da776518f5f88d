//! Error taxonomy for graph operations.
//!
//! Lookup failures ([`GraphError::MissingNode`], [`GraphError::MissingRoot`])
//! are kept distinct from codec and file failures so callers can tell a
//! structurally wrong request apart from bad input data. A project that has
//! advice but no graph is *not* an error; see [`crate::trim`].

use std::path::PathBuf;

/// Errors produced by `deptrim-core`.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node identifier was used as an adjacency or subgraph root but was
    /// never registered in the graph.
    #[error("node {identifier} is not in the graph")]
    MissingNode { identifier: String },

    /// Root lookup requires exactly one node with in-degree 0.
    #[error("could not find a unique root node ({candidates} nodes have in-degree 0)")]
    MissingRoot { candidates: usize },

    /// A merge was requested over zero graphs.
    #[error("no graphs to merge")]
    NothingToMerge,

    /// Maintained counters disagree with the raw edge set.
    #[error("graph bookkeeping is inconsistent: {detail}")]
    Inconsistent { detail: String },

    /// Reverse-dependency queries only accept project nodes.
    #[error("cannot query for non-project dependency {identifier}")]
    NotAProject { identifier: String },

    /// A snapshot or advice file is not valid JSON of the expected shape.
    #[error("malformed JSON input: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    pub(crate) fn missing_node(identifier: impl Into<String>) -> Self {
        Self::MissingNode {
            identifier: identifier.into(),
        }
    }

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingNode { .. } => "E2001",
            Self::MissingRoot { .. } => "E2002",
            Self::NothingToMerge => "E2003",
            Self::NotAProject { .. } => "E2004",
            Self::Json { .. } => "E3001",
            Self::Io { .. } => "E5001",
            Self::Inconsistent { .. } => "E9001",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingNode { .. } => {
                Some("Check the identifier against the graph's node list.")
            }
            Self::MissingRoot { .. } => {
                Some("Query a subgraph rooted at an explicit project instead.")
            }
            Self::NothingToMerge => {
                Some("Make sure at least one advised project has a graph snapshot.")
            }
            Self::NotAProject { .. } => Some("Project identifiers start with ':'."),
            Self::Json { .. } => Some("Regenerate the snapshot or advice report and retry."),
            Self::Io { .. } => Some("Check that the file exists and is readable."),
            Self::Inconsistent { .. } => None,
        }
    }
}
