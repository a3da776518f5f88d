//! Per-project graph resolution.
//!
//! The trimmer asks a [`ProjectGraphProvider`] for each advised project's
//! base graph. "No graph for this project" is an expected answer (the
//! project may be outside the current build view), so providers return
//! `Ok(None)` for it and reserve errors for data that exists but cannot be
//! read.
//!
//! [`LazyGraphCache`] is the file-backed provider: it knows which snapshot
//! file belongs to which project and decodes each one on first request.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::DependencyGraph;
use crate::snapshot;

/// Resolves a project path to that project's base dependency graph.
pub trait ProjectGraphProvider {
    /// The graph anchored on `project_path`, or `None` if there is none.
    ///
    /// The returned graph is owned by the caller and may be mutated freely.
    ///
    /// # Errors
    ///
    /// Implementations return an error only when a graph exists but cannot
    /// be loaded.
    fn project_graph(&mut self, project_path: &str) -> Result<Option<DependencyGraph>, GraphError>;
}

impl<F> ProjectGraphProvider for F
where
    F: FnMut(&str) -> Option<DependencyGraph>,
{
    fn project_graph(&mut self, project_path: &str) -> Result<Option<DependencyGraph>, GraphError> {
        Ok(self(project_path))
    }
}

// ---------------------------------------------------------------------------
// LazyGraphCache
// ---------------------------------------------------------------------------

/// Project path → snapshot file, decoded on first access and cached.
#[derive(Debug, Default)]
pub struct LazyGraphCache {
    files: BTreeMap<String, PathBuf>,
    graphs: HashMap<String, DependencyGraph>,
}

impl LazyGraphCache {
    #[must_use]
    pub fn new(files: impl IntoIterator<Item = (String, PathBuf)>) -> Self {
        Self {
            files: files.into_iter().collect(),
            graphs: HashMap::new(),
        }
    }

    /// Map `project_path` to `file`, replacing any earlier mapping and
    /// forgetting a graph already cached for it.
    pub fn insert(&mut self, project_path: impl Into<String>, file: impl Into<PathBuf>) {
        let project_path = project_path.into();
        self.graphs.remove(&project_path);
        self.files.insert(project_path, file.into());
    }

    /// Configured project paths, sorted.
    pub fn projects(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of graphs decoded so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.graphs.len()
    }

    /// Borrow the graph for `project_path`, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] or [`GraphError::Json`] if the mapped file
    /// cannot be decoded.
    #[instrument(skip(self))]
    pub fn get(&mut self, project_path: &str) -> Result<Option<&DependencyGraph>, GraphError> {
        if !self.graphs.contains_key(project_path) {
            let Some(file) = self.files.get(project_path) else {
                debug!("no graph file mapped");
                return Ok(None);
            };
            let graph = snapshot::read_file(file)?;
            self.graphs.insert(project_path.to_string(), graph);
        }
        Ok(self.graphs.get(project_path))
    }

    /// Load every configured project graph, in project-path order.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be decoded.
    pub fn load_all(&mut self) -> Result<Vec<DependencyGraph>, GraphError> {
        let projects: Vec<String> = self.files.keys().cloned().collect();
        let mut graphs = Vec::with_capacity(projects.len());
        for project in projects {
            if let Some(graph) = self.get(&project)? {
                graphs.push(graph.clone());
            }
        }
        Ok(graphs)
    }
}

impl ProjectGraphProvider for LazyGraphCache {
    fn project_graph(&mut self, project_path: &str) -> Result<Option<DependencyGraph>, GraphError> {
        Ok(self.get(project_path)?.cloned())
    }
}
