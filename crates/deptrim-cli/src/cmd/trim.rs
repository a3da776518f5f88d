//! `deptrim trim` — the build graph as it would be if all advice were followed.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use deptrim_core::advice::read_build_advice;
use deptrim_core::{GraphMetrics, GraphTrimmer};
use serde::Serialize;
use tracing::info;

use super::{Artifacts, merged_graph};
use crate::config::{DeptrimConfig, ProjectArgs};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode, surface};

/// Arguments for `deptrim trim`.
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Build-wide advice report (JSON list of per-project advice).
    #[arg(long, value_name = "FILE")]
    pub advice: PathBuf,

    #[command(flatten)]
    pub projects: ProjectArgs,

    /// Directory for the trimmed graph artefacts.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrimOutput {
    advised_projects: usize,
    metrics: GraphMetrics,
    node_delta: i64,
    edge_delta: i64,
    summary: String,
    files: Vec<String>,
}

/// Execute `deptrim trim`.
pub fn run_trim(
    args: &TrimArgs,
    config: &DeptrimConfig,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let advice =
        read_build_advice(&project_root.join(&args.advice)).map_err(|err| surface(output, err))?;

    let mut cache = config.graph_cache(&args.projects, project_root);
    let original = merged_graph(&mut cache, output)?;
    let trimmed = GraphTrimmer::new(&advice, &mut cache)
        .trim()
        .map_err(|err| surface(output, err))?;

    let metrics = GraphMetrics::from_graphs(&original, &trimmed);
    info!(
        node_delta = metrics.node_delta(),
        edge_delta = metrics.edge_delta(),
        "trimmed build graph"
    );

    let mut artifacts =
        Artifacts::create(config.output_dir(args.out_dir.as_deref(), project_root))?;
    artifacts.json("trimmed-graph.json", &trimmed)?;
    if config.output.dot {
        artifacts.dot("trimmed-graph.gv", &trimmed)?;
    }

    let payload = TrimOutput {
        advised_projects: advice.len(),
        metrics,
        node_delta: metrics.node_delta(),
        edge_delta: metrics.edge_delta(),
        summary: metrics.summary(),
        files: artifacts.paths(),
    };

    render_mode(
        output,
        &payload,
        |report, w| writeln!(w, "{}", report.summary),
        render_trim_pretty,
    )
}

fn render_trim_pretty(report: &TrimOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Trimmed dependency graph")?;
    pretty_kv(w, "Advised", report.advised_projects.to_string())?;
    pretty_kv(
        w,
        "Nodes",
        format!(
            "{} -> {} ({:+})",
            report.metrics.original.node_count, report.metrics.trimmed.node_count, report.node_delta
        ),
    )?;
    pretty_kv(
        w,
        "Edges",
        format!(
            "{} -> {} ({:+})",
            report.metrics.original.edge_count, report.metrics.trimmed.edge_count, report.edge_delta
        ),
    )?;
    writeln!(w)?;
    writeln!(w, "{}", report.summary)?;
    for file in &report.files {
        writeln!(w, "  {file}")?;
    }
    Ok(())
}
