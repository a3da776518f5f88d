//! Graph node identity.
//!
//! Every node kind reduces to one canonical identifier string. Equality,
//! ordering and hashing all go through that identifier, so the graph engine
//! never needs to know which kind of node it is holding.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A build unit in a dependency graph.
#[derive(Debug, Clone)]
pub enum Node {
    /// A project in the build, identified by its path (e.g. `:app`).
    Project { path: String },
    /// A published artifact, identified by `group:module[:version]`.
    Artifact { coordinates: String },
    /// Any other identifier.
    Bare { identifier: String },
}

impl Node {
    #[must_use]
    pub fn project(path: impl Into<String>) -> Self {
        Self::Project { path: path.into() }
    }

    #[must_use]
    pub fn artifact(group: &str, module: &str, version: Option<&str>) -> Self {
        let coordinates = match version {
            Some(version) => format!("{group}:{module}:{version}"),
            None => format!("{group}:{module}"),
        };
        Self::Artifact { coordinates }
    }

    #[must_use]
    pub fn bare(identifier: impl Into<String>) -> Self {
        Self::Bare {
            identifier: identifier.into(),
        }
    }

    /// Classify an identifier string.
    ///
    /// - leading `:` → [`Node::Project`]
    /// - two or three non-empty `:`-separated parts → [`Node::Artifact`]
    /// - anything else → [`Node::Bare`]
    ///
    /// `Node::parse(n.identifier())` always yields a node equal to `n`.
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        if identifier.starts_with(':') {
            return Self::project(identifier);
        }
        let parts: Vec<&str> = identifier.split(':').collect();
        let is_coordinate = matches!(parts.len(), 2 | 3) && parts.iter().all(|p| !p.is_empty());
        if is_coordinate {
            Self::Artifact {
                coordinates: identifier.to_string(),
            }
        } else {
            Self::bare(identifier)
        }
    }

    /// The canonical identifier used for equality and map keys.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Project { path } => path,
            Self::Artifact { coordinates } => coordinates,
            Self::Bare { identifier } => identifier,
        }
    }

    /// Short human-readable label.
    ///
    /// Artifacts drop their group; projects and bare nodes use the identifier.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Artifact { coordinates } => coordinates
                .split_once(':')
                .map_or(coordinates.as_str(), |(_, rest)| rest),
            Self::Project { path } => path,
            Self::Bare { identifier } => identifier,
        }
    }

    #[must_use]
    pub const fn is_project(&self) -> bool {
        matches!(self, Self::Project { .. })
    }

    /// The artifact version, if this is a versioned artifact node.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Artifact { coordinates } => coordinates.splitn(3, ':').nth(2),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier().cmp(other.identifier())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl From<&str> for Node {
    fn from(identifier: &str) -> Self {
        Self::parse(identifier)
    }
}

impl From<String> for Node {
    fn from(identifier: String) -> Self {
        Self::parse(&identifier)
    }
}

impl From<&String> for Node {
    fn from(identifier: &String) -> Self {
        Self::parse(identifier)
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}
