//! `deptrim dependents <id>` — everything that depends on a project.
//!
//! Text output is the DOT rendering of the reverse subgraph, so it can be
//! piped straight into `dot -Tsvg`.

use std::io::Write;
use std::path::Path;

use clap::Args;
use deptrim_core::graph::to_dot;
use deptrim_core::{DependencyGraph, reverse_dependents};
use serde::Serialize;

use super::merged_graph;
use crate::config::{DeptrimConfig, ProjectArgs};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode, surface};

/// Arguments for `deptrim dependents`.
#[derive(Args, Debug)]
pub struct DependentsArgs {
    /// Project path to query (e.g. `:core`).
    pub id: String,

    #[command(flatten)]
    pub projects: ProjectArgs,
}

#[derive(Debug, Serialize)]
struct DependentsOutput {
    project: String,
    dependents: Vec<String>,
    graph: DependencyGraph,
}

/// Execute `deptrim dependents`.
pub fn run_dependents(
    args: &DependentsArgs,
    config: &DeptrimConfig,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let mut cache = config.graph_cache(&args.projects, project_root);
    let merged = merged_graph(&mut cache, output)?;

    let graph = reverse_dependents(&merged, &args.id).map_err(|err| surface(output, err))?;

    let mut dependents: Vec<String> = graph
        .nodes()
        .map(|node| node.identifier().to_string())
        .filter(|id| id != &args.id)
        .collect();
    dependents.sort();

    let payload = DependentsOutput {
        project: args.id.clone(),
        dependents,
        graph,
    };

    render_mode(
        output,
        &payload,
        |report, w| w.write_all(to_dot(&report.graph).as_bytes()),
        render_dependents_pretty,
    )
}

fn render_dependents_pretty(report: &DependentsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Dependents of {}", report.project))?;
    pretty_kv(w, "Count", report.dependents.len().to_string())?;
    if report.dependents.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for id in &report.dependents {
        writeln!(w, "  {id}")?;
    }
    Ok(())
}
