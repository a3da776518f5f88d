#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "deptrim: multi-project dependency graphs and advice trimming",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (default: ./deptrim.toml if present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Merge every project graph",
        long_about = "Union every configured project graph into one build-wide graph and write it as JSON and DOT.",
        after_help = "EXAMPLES:\n    # Merge the projects listed in deptrim.toml\n    deptrim merge\n\n    # Map projects on the command line\n    deptrim merge --project :app=graphs/app.json --project :lib=graphs/lib.json\n\n    # Emit machine-readable output\n    deptrim merge --json"
    )]
    Merge(cmd::merge::MergeArgs),

    #[command(
        about = "Show what depends on a project",
        long_about = "Print the reverse dependency subgraph rooted at a project node.",
        after_help = "EXAMPLES:\n    # DOT output for graphviz\n    deptrim dependents :core --format text | dot -Tsvg > core.svg\n\n    # Emit machine-readable output\n    deptrim dependents :core --json"
    )]
    Dependents(cmd::dependents::DependentsArgs),

    #[command(
        about = "Apply build-wide dependency advice",
        long_about = "Apply every project's add/remove advice, prune orphaned dependencies, and compare the result with the current build graph.",
        after_help = "EXAMPLES:\n    # Trim using an advice report\n    deptrim trim --advice build/advice.json\n\n    # Emit machine-readable output\n    deptrim trim --advice build/advice.json --json"
    )]
    Trim(cmd::trim::TrimArgs),

    #[command(
        about = "Report one project's trim",
        long_about = "Apply one project's advice to its graph and report the node and edge change.",
        after_help = "EXAMPLES:\n    # Single project report\n    deptrim health --graph graphs/lib.json --advice lib-advice.json"
    )]
    Health(cmd::health::HealthArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DEPTRIM_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "deptrim=debug,info"
        } else {
            "deptrim=info,warn"
        })
    });

    let format = env::var("DEPTRIM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = env::current_dir()?;
    let output = cli.output_mode();
    debug!(?output, root = %project_root.display(), "starting");

    // `health` works on explicit files and never needs the config.
    let load_config = || config::load_config(cli.config.as_deref(), &project_root);

    match &cli.command {
        Commands::Merge(args) => cmd::merge::run_merge(args, &load_config()?, output, &project_root),
        Commands::Dependents(args) => {
            cmd::dependents::run_dependents(args, &load_config()?, output, &project_root)
        }
        Commands::Trim(args) => cmd::trim::run_trim(args, &load_config()?, output, &project_root),
        Commands::Health(args) => cmd::health::run_health(args, output, &project_root),
    }
}
