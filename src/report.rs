//! The full analysis report written by `repolens analyze`

use chrono::{DateTime, Utc};
use repolens_core::{CallGraph, FileEntry, FileTree, RepositoryAnalysis, RepositoryStats};
use repolens_indexer::RepositoryIndex;
use repolens_render::{
    DisplayLimits, directory_tree_diagram, markdown_digest, mindmap_diagram,
    module_dependency_diagram,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub stats: RepositoryStats,
    pub files: Vec<FileEntry>,
    pub file_tree: FileTree,
    #[serde(flatten)]
    pub analysis: RepositoryAnalysis,
    pub call_graph: CallGraph,
    pub mermaid_diagram: String,
    pub module_dependency_diagram: String,
    pub directory_tree_diagram: String,
    pub markdown_digest: String,
    pub summary: String,
    pub summary_source: String,
}

impl AnalysisReport {
    pub fn build(index: RepositoryIndex, limits: &DisplayLimits) -> Self {
        let mermaid_diagram = mindmap_diagram(&index.analysis, limits);
        let module_dependency_diagram = module_dependency_diagram(&index.modules, limits);
        let directory_tree_diagram = directory_tree_diagram(&index.files, limits);
        let markdown_digest = markdown_digest(&index.name, &index.files, &index.analysis);

        AnalysisReport {
            generated_at: Utc::now(),
            root: index.name,
            stats: index.stats,
            files: index.files,
            file_tree: index.tree,
            analysis: index.analysis,
            call_graph: index.graph,
            mermaid_diagram,
            module_dependency_diagram,
            directory_tree_diagram,
            markdown_digest,
            summary: index.summary.text,
            summary_source: index.summary.source,
        }
    }
}
