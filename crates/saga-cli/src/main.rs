mod cmd_active;
mod cmd_all;
mod cmd_export;
mod cmd_list;
mod cmd_projects;
mod util;

use std::path::PathBuf;

use clap::Parser;
use saga_store::ClaudePaths;

/// Default export base, next to wherever the exporter is invoked.
const DEFAULT_OUTPUT_DIR: &str = "sessions";

#[derive(Parser)]
#[command(
    name = "saga",
    version,
    about = "Export Claude Code session transcripts to readable Markdown",
    after_help = "With no arguments, the newest session of the current project is exported."
)]
struct Cli {
    /// Convert a specific session file instead of the newest one
    file: Option<PathBuf>,
    /// Output path (only meaningful together with a session file)
    output: Option<PathBuf>,
    /// List all sessions in the current project
    #[arg(long)]
    list: bool,
    /// Export all sessions from the current project
    #[arg(long)]
    all: bool,
    /// Show active sessions and export the selected one
    #[arg(long)]
    active: bool,
    /// List all projects and export the selected one
    #[arg(long)]
    projects: bool,
    /// Base directory for exported markdown (default: ./sessions)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=saga=debug for probe/store diagnostics; quiet by default.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = ClaudePaths::from_env();
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    match cli.file {
        Some(file) => cmd_export::single(&file, cli.output.as_deref(), &output_dir),
        None if cli.list => cmd_list::execute(&paths),
        None if cli.all => cmd_all::execute(&paths, &output_dir),
        None if cli.active => cmd_active::execute(&paths, &output_dir),
        None if cli.projects => cmd_projects::execute(&paths, &output_dir),
        None => cmd_export::newest(&paths, &output_dir),
    }
}
