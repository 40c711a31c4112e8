//! Repolens CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod report;

use commands::DiagramKind;
use config::AppConfig;

#[derive(Parser)]
#[command(name = "repolens")]
#[command(about = "Static architecture analysis for JavaScript, TypeScript and Python repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository root path (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to repolens.toml / repolens.yaml under the root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the repository and print the full JSON report
    Analyze {
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ask the summarizer for per-file insight
        #[arg(long)]
        deep: bool,
    },
    /// Print the call graph as JSON
    Graph,
    /// Print one Mermaid diagram
    Diagram {
        #[arg(short, long, value_enum, default_value = "mindmap")]
        kind: DiagramKind,
    },
    /// Print the Markdown digest
    Digest,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("repolens={}", log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Version = cli.command {
        println!("Repolens v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing::debug!("Repolens v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Repository root: {}", cli.root.display());
    let config = AppConfig::load(&cli.root, cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { output, deep } => commands::analyze(cli.root, config, output, deep).await,
        Commands::Graph => commands::graph(cli.root, config).await,
        Commands::Diagram { kind } => commands::diagram(cli.root, config, kind).await,
        Commands::Digest => commands::digest(cli.root, config).await,
        Commands::Version => Ok(()),
    }
}
