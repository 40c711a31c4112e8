//! Orchestrates the batch: fetch, extract, aggregate, then build graphs

use crate::config::IndexerConfig;
use crate::databases::detect_databases;
use crate::error::{IndexerError, Result};
use crate::extractor::extract_file;
use crate::limiter::limit_concurrency;
use crate::source::ContentSource;
use repolens_ai::{
    HeuristicSummarizer, RepositorySummaryRequest, Summarizer, Summary, analyze_file_or_skip,
    summarize_or_fallback,
};
use repolens_core::{
    CallGraph, FileAnalysis, FileDescriptor, FileEntry, FileInsight, FileTree, ModuleGraph,
    ModuleResolver, RepositoryAnalysis, RepositoryStats, backfill_calls, build_call_graph,
};
use std::sync::Arc;

/// Everything known about one repository after a full index.
#[derive(Debug)]
pub struct RepositoryIndex {
    pub name: String,
    /// Every listed file, text or not.
    pub files: Vec<FileEntry>,
    /// Text files whose content was fetched, in listing order.
    pub descriptors: Vec<FileDescriptor>,
    pub analysis: RepositoryAnalysis,
    pub graph: CallGraph,
    pub modules: ModuleGraph,
    pub tree: FileTree,
    pub stats: RepositoryStats,
    pub summary: Summary,
}

struct IndexedFile {
    descriptor: FileDescriptor,
    analysis: FileAnalysis,
    insight: Option<FileInsight>,
}

pub struct Coordinator {
    source: Arc<dyn ContentSource>,
    summarizer: Arc<dyn Summarizer>,
    config: IndexerConfig,
}

impl Coordinator {
    pub fn new(source: Arc<dyn ContentSource>, config: IndexerConfig) -> Self {
        Coordinator {
            source,
            summarizer: Arc::new(HeuristicSummarizer),
            config,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    pub async fn run_full_index(&self) -> Result<RepositoryIndex> {
        let name = self.source.name();
        let files = self.source.list_files().await?;
        if files.is_empty() {
            return Err(IndexerError::EmptyRepository);
        }
        tracing::info!("Discovered {} files in {}", files.len(), name);

        let tasks = files
            .iter()
            .filter(|entry| entry.is_text)
            .map(|entry| move || self.index_file(entry));
        let indexed = limit_concurrency(tasks, self.config.concurrency).await;

        let mut analysis = RepositoryAnalysis::new();
        let mut descriptors = Vec::with_capacity(indexed.len());
        for file in indexed.into_iter().flatten() {
            analysis.merge(file.analysis);
            analysis.insights.extend(file.insight);
            descriptors.push(file.descriptor);
        }
        tracing::info!("Analyzed {} text files", descriptors.len());

        analysis.databases = detect_databases(&descriptors);

        let graph = build_call_graph(&analysis);
        backfill_calls(&mut analysis, &graph);

        let resolver = ModuleResolver::new(files.iter().map(|f| f.path.as_str()));
        let modules = ModuleGraph::build(&analysis.imports, &resolver);
        tracing::info!(
            "Module view has {} files and {} dependencies",
            modules.file_count(),
            modules.dependency_count()
        );

        let tree = FileTree::build(&files);
        let stats = RepositoryStats::collect(files.len(), &analysis, graph.call_edge_count());

        let request = RepositorySummaryRequest::new(name.as_str(), &files, &analysis, stats.clone());
        let summary = summarize_or_fallback(self.summarizer.as_ref(), &request).await;
        tracing::info!("Summary generated by {}", summary.source);

        Ok(RepositoryIndex {
            name,
            files,
            descriptors,
            analysis,
            graph,
            modules,
            tree,
            stats,
            summary,
        })
    }

    /// Fetch and extract one file. Read failures drop the file from the batch.
    async fn index_file(&self, entry: &FileEntry) -> Option<IndexedFile> {
        let content = match self.source.read(&entry.path).await {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!("Skipping non-UTF-8 file {}", entry.path);
                return None;
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", entry.path, e);
                return None;
            }
        };

        let descriptor = FileDescriptor::new(entry.path.clone(), content);
        let analysis = extract_file(&descriptor, self.config.max_file_bytes);
        tracing::debug!(
            "Extracted {} functions from {}",
            analysis.functions.len(),
            descriptor.path
        );

        let insight = if self.config.deep_analysis {
            analyze_file_or_skip(
                self.summarizer.as_ref(),
                &descriptor.path,
                descriptor.language.as_str(),
                &descriptor.content,
            )
            .await
        } else {
            None
        };

        Some(IndexedFile {
            descriptor,
            analysis,
            insight,
        })
    }
}
