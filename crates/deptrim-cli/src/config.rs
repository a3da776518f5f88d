//! `deptrim.toml` loading and project-graph mapping.
//!
//! ```toml
//! [projects]
//! ":app" = "graphs/app.json"
//! ":lib" = "graphs/lib.json"
//!
//! [output]
//! dir = "build/deptrim"
//! dot = true
//! ```
//!
//! Relative paths in the file resolve against the directory holding the
//! file. Relative paths given on the command line resolve against the
//! working directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use deptrim_core::LazyGraphCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONFIG_FILE: &str = "deptrim.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeptrimConfig {
    /// Project path → graph snapshot file.
    #[serde(default)]
    pub projects: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_true")]
    pub dot: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            dot: default_true(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build/deptrim")
}

const fn default_true() -> bool {
    true
}

/// Load configuration.
///
/// An explicit `--config` path must exist. Without one, `deptrim.toml` in
/// `project_root` is used if present, else defaults.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<DeptrimConfig> {
    let path = match explicit {
        Some(path) => project_root.join(path),
        None => {
            let path = project_root.join(CONFIG_FILE);
            if !path.exists() {
                debug!("no {CONFIG_FILE}; using defaults");
                return Ok(DeptrimConfig {
                    base_dir: project_root.to_path_buf(),
                    ..DeptrimConfig::default()
                });
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut config = toml::from_str::<DeptrimConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.base_dir = path
        .parent()
        .map_or_else(|| project_root.to_path_buf(), Path::to_path_buf);
    debug!(path = %path.display(), projects = config.projects.len(), "loaded config");
    Ok(config)
}

impl DeptrimConfig {
    /// A graph cache over the configured projects, extended or overridden
    /// by `--project` mappings.
    pub fn graph_cache(&self, args: &ProjectArgs, project_root: &Path) -> LazyGraphCache {
        let mut cache = LazyGraphCache::new(
            self.projects
                .iter()
                .map(|(project, file)| (project.clone(), self.base_dir.join(file))),
        );
        for (project, file) in &args.projects {
            cache.insert(project.clone(), project_root.join(file));
        }
        cache
    }

    /// Where artefacts go: `--out-dir` if given, else `[output] dir`.
    pub fn output_dir(&self, flag: Option<&Path>, project_root: &Path) -> PathBuf {
        flag.map_or_else(
            || self.base_dir.join(&self.output.dir),
            |dir| project_root.join(dir),
        )
    }
}

/// `--project` mappings shared by the graph commands.
#[derive(Args, Debug, Default, Clone)]
pub struct ProjectArgs {
    /// Map a project path to its graph snapshot (repeatable).
    #[arg(
        long = "project",
        value_name = "PATH=FILE",
        value_parser = parse_project_mapping
    )]
    pub projects: Vec<(String, PathBuf)>,
}

fn parse_project_mapping(raw: &str) -> Result<(String, PathBuf), String> {
    let (project, file) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=FILE, got '{raw}'"))?;
    let project = project.trim();
    let file = file.trim();
    if project.is_empty() || file.is_empty() {
        return Err(format!("expected PATH=FILE, got '{raw}'"));
    }
    Ok((project.to_string(), PathBuf::from(file)))
}
