//! `deptrim health` — single-project trim report.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use deptrim_core::advice::read_project_advice;
use deptrim_core::{GraphMetrics, snapshot, trim_project};
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode, surface};

/// Arguments for `deptrim health`.
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// The project's graph snapshot.
    #[arg(long, value_name = "FILE")]
    pub graph: PathBuf,

    /// The project's advice report.
    #[arg(long, value_name = "FILE")]
    pub advice: PathBuf,
}

#[derive(Debug, Serialize)]
struct HealthOutput {
    project: String,
    metrics: GraphMetrics,
    node_delta: i64,
    edge_delta: i64,
    summary: String,
}

/// Execute `deptrim health`.
pub fn run_health(args: &HealthArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let base =
        snapshot::read_file(&project_root.join(&args.graph)).map_err(|err| surface(output, err))?;
    let advice = read_project_advice(&project_root.join(&args.advice))
        .map_err(|err| surface(output, err))?;

    let trimmed = trim_project(&base, &advice).map_err(|err| surface(output, err))?;
    let metrics = GraphMetrics::from_graphs(&base, &trimmed);

    let payload = HealthOutput {
        project: advice.project_path,
        metrics,
        node_delta: metrics.node_delta(),
        edge_delta: metrics.edge_delta(),
        summary: metrics.summary(),
    };

    render_mode(
        output,
        &payload,
        |report, w| writeln!(w, "{}", report.summary),
        render_health_pretty,
    )
}

fn render_health_pretty(report: &HealthOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Project health: {}", report.project))?;
    pretty_kv(w, "Node delta", format!("{:+}", report.node_delta))?;
    pretty_kv(w, "Edge delta", format!("{:+}", report.edge_delta))?;
    writeln!(w)?;
    writeln!(w, "{}", report.summary)
}
