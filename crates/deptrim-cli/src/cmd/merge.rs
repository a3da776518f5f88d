//! `deptrim merge` — union every project graph into one build-wide graph.
//!
//! Writes `merged-graph.json` plus, unless `[output] dot = false`, DOT
//! renderings of the merged graph and of its reversal.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use super::{Artifacts, merged_graph};
use crate::config::{DeptrimConfig, ProjectArgs};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `deptrim merge`.
#[derive(Args, Debug, Default)]
pub struct MergeArgs {
    #[command(flatten)]
    pub projects: ProjectArgs,

    /// Directory for the merged graph artefacts.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MergeOutput {
    projects: Vec<String>,
    node_count: usize,
    edge_count: usize,
    isolated: usize,
    files: Vec<String>,
}

/// Execute `deptrim merge`.
pub fn run_merge(
    args: &MergeArgs,
    config: &DeptrimConfig,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let mut cache = config.graph_cache(&args.projects, project_root);
    let merged = merged_graph(&mut cache, output)?;

    let mut artifacts =
        Artifacts::create(config.output_dir(args.out_dir.as_deref(), project_root))?;
    artifacts.json("merged-graph.json", &merged)?;
    if config.output.dot {
        artifacts.dot("merged-graph.gv", &merged)?;
        artifacts.dot("merged-graph-rev.gv", &merged.reversed())?;
    }

    let payload = MergeOutput {
        projects: cache.projects().map(str::to_string).collect(),
        node_count: merged.node_count(),
        edge_count: merged.edge_count(),
        isolated: merged.isolated_nodes().count(),
        files: artifacts.paths(),
    };

    render_mode(output, &payload, render_merge_text, render_merge_pretty)
}

fn render_merge_text(report: &MergeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "merged {} projects: {} nodes, {} edges",
        report.projects.len(),
        report.node_count,
        report.edge_count
    )?;
    for file in &report.files {
        writeln!(w, "{file}")?;
    }
    Ok(())
}

fn render_merge_pretty(report: &MergeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Merged dependency graph")?;
    pretty_kv(w, "Projects", report.projects.join(", "))?;
    pretty_kv(w, "Nodes", report.node_count.to_string())?;
    pretty_kv(w, "Edges", report.edge_count.to_string())?;
    pretty_kv(w, "Isolated", report.isolated.to_string())?;
    writeln!(w)?;
    pretty_section(w, "Written")?;
    for file in &report.files {
        writeln!(w, "  {file}")?;
    }
    Ok(())
}
