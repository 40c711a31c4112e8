//! CLI command implementations

use crate::config::AppConfig;
use crate::report::AnalysisReport;
use anyhow::Context;
use repolens_ai::{Provider, create_summarizer};
use repolens_indexer::{Coordinator, LocalSource, RepositoryIndex};
use repolens_render::{
    directory_tree_diagram, markdown_digest, mindmap_diagram, module_dependency_diagram,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DiagramKind {
    /// Architecture mind map
    Mindmap,
    /// File-to-file import graph
    Modules,
    /// Directory tree
    Tree,
}

async fn run_index(root: &Path, config: &AppConfig) -> anyhow::Result<RepositoryIndex> {
    let source = LocalSource::new(root, &config.indexer)
        .with_context(|| format!("Cannot open repository at {}", root.display()))?;
    let summarizer = create_summarizer(&config.summarizer)?;
    Coordinator::new(Arc::new(source), config.indexer.clone())
        .with_summarizer(Arc::from(summarizer))
        .run_full_index()
        .await
        .with_context(|| format!("Failed to index {}", root.display()))
}

/// Commands that never print a summary stay offline.
fn offline(mut config: AppConfig) -> AppConfig {
    config.summarizer.provider = Provider::Heuristic;
    config.indexer.deep_analysis = false;
    config
}

pub async fn analyze(
    root: PathBuf,
    mut config: AppConfig,
    output: Option<PathBuf>,
    deep: bool,
) -> anyhow::Result<()> {
    config.indexer.deep_analysis |= deep;
    tracing::info!("Analyzing repository: {}", root.display());

    let index = run_index(&root, &config).await?;
    let report = AnalysisReport::build(index, &config.display);
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn graph(root: PathBuf, config: AppConfig) -> anyhow::Result<()> {
    let index = run_index(&root, &offline(config)).await?;
    println!("{}", serde_json::to_string_pretty(&index.graph)?);
    Ok(())
}

pub async fn diagram(root: PathBuf, config: AppConfig, kind: DiagramKind) -> anyhow::Result<()> {
    let config = offline(config);
    let index = run_index(&root, &config).await?;
    let limits = &config.display;
    let text = match kind {
        DiagramKind::Mindmap => mindmap_diagram(&index.analysis, limits),
        DiagramKind::Modules => module_dependency_diagram(&index.modules, limits),
        DiagramKind::Tree => directory_tree_diagram(&index.files, limits),
    };
    print!("{text}");
    Ok(())
}

pub async fn digest(root: PathBuf, config: AppConfig) -> anyhow::Result<()> {
    let index = run_index(&root, &offline(config)).await?;
    print!("{}", markdown_digest(&index.name, &index.files, &index.analysis));
    Ok(())
}
