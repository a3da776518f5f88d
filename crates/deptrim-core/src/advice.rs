//! Dependency advice records.
//!
//! Advice is produced elsewhere (usage analysis decides what is unused or
//! undeclared). This crate only reads it and sorts it by kind. The wire
//! shape matches the advice reports the analysis emits:
//!
//! ```json
//! {
//!   "projectPath": ":lib",
//!   "dependencyAdvice": [
//!     { "dependency": { "identifier": "okio" }, "toConfiguration": "implementation" },
//!     { "dependency": { "identifier": "moshi" }, "fromConfiguration": "implementation" }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// The dependency an advice entry talks about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub identifier: String,
}

/// What an advice entry asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    /// Declare a dependency that is used but not declared.
    Add,
    /// Drop a declared dependency that is unused.
    Remove,
    /// Move a declared dependency to another configuration.
    Change,
    /// Anything else; ignored by the graph.
    Other,
}

/// One piece of advice about one dependency of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAdvice {
    pub dependency: Dependency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_configuration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_configuration: Option<String>,
}

impl DependencyAdvice {
    /// Advice to declare `identifier` on `configuration`.
    #[must_use]
    pub fn add(identifier: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            dependency: Dependency {
                identifier: identifier.into(),
            },
            from_configuration: None,
            to_configuration: Some(configuration.into()),
        }
    }

    /// Advice to drop `identifier` from `configuration`.
    #[must_use]
    pub fn remove(identifier: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            dependency: Dependency {
                identifier: identifier.into(),
            },
            from_configuration: Some(configuration.into()),
            to_configuration: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AdviceKind {
        match (&self.from_configuration, &self.to_configuration) {
            (None, Some(_)) => AdviceKind::Add,
            (Some(_), None) => AdviceKind::Remove,
            (Some(_), Some(_)) => AdviceKind::Change,
            (None, None) => AdviceKind::Other,
        }
    }

    #[must_use]
    pub const fn is_add(&self) -> bool {
        matches!(self.kind(), AdviceKind::Add)
    }

    #[must_use]
    pub const fn is_remove(&self) -> bool {
        matches!(self.kind(), AdviceKind::Remove)
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.dependency.identifier
    }
}

/// All dependency advice for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAdvice {
    pub project_path: String,
    #[serde(default)]
    pub dependency_advice: Vec<DependencyAdvice>,
}

impl ProjectAdvice {
    #[must_use]
    pub fn new(project_path: impl Into<String>, dependency_advice: Vec<DependencyAdvice>) -> Self {
        Self {
            project_path: project_path.into(),
            dependency_advice,
        }
    }

    /// Split into `(adds, removes)`. Other kinds are dropped.
    #[must_use]
    pub fn partition(&self) -> (Vec<&DependencyAdvice>, Vec<&DependencyAdvice>) {
        let adds = self.dependency_advice.iter().filter(|a| a.is_add()).collect();
        let removes = self
            .dependency_advice
            .iter()
            .filter(|a| a.is_remove())
            .collect();
        (adds, removes)
    }

    /// `true` when no advice would change the graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self
            .dependency_advice
            .iter()
            .any(|a| a.is_add() || a.is_remove())
    }
}

/// Read a single project's advice from a JSON file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] or [`GraphError::Json`] on failure.
pub fn read_project_advice(path: &Path) -> Result<ProjectAdvice, GraphError> {
    read_json(path)
}

/// Read a build-wide advice list from a JSON file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] or [`GraphError::Json`] on failure.
pub fn read_build_advice(path: &Path) -> Result<Vec<ProjectAdvice>, GraphError> {
    read_json(path)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, GraphError> {
    let content = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
