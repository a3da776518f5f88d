pub mod dependents;
pub mod health;
pub mod merge;
pub mod trim;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use deptrim_core::graph::to_dot;
use deptrim_core::{DependencyGraph, GraphError, LazyGraphCache, merge_all, snapshot};
use tracing::info;

use crate::output::{CliError, OutputMode, render_error, surface};

/// Decode every mapped project graph and union them.
fn merged_graph(cache: &mut LazyGraphCache, output: OutputMode) -> anyhow::Result<DependencyGraph> {
    if cache.is_empty() {
        let msg = "no project graphs configured";
        render_error(
            output,
            &CliError::with_details(
                msg,
                "Add a [projects] table to deptrim.toml or pass --project :app=graphs/app.json",
                "no_projects",
            ),
        )?;
        anyhow::bail!("{msg}");
    }

    let graphs = cache.load_all().map_err(|err| surface(output, err))?;
    merge_all(graphs).ok_or_else(|| surface(output, GraphError::NothingToMerge))
}

/// Writes graph artefacts into one directory and remembers what it wrote.
struct Artifacts {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl Artifacts {
    fn create(dir: PathBuf) -> anyhow::Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    fn json(&mut self, name: &str, graph: &DependencyGraph) -> anyhow::Result<()> {
        let path = self.dir.join(name);
        snapshot::write_file(&path, graph)?;
        self.record(path);
        Ok(())
    }

    fn dot(&mut self, name: &str, graph: &DependencyGraph) -> anyhow::Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, to_dot(graph))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.record(path);
        Ok(())
    }

    fn record(&mut self, path: PathBuf) {
        info!(path = %path.display(), "wrote artefact");
        self.written.push(path);
    }

    fn paths(&self) -> Vec<String> {
        self.written
            .iter()
            .map(|path| path.display().to_string())
            .collect()
    }
}
