//! Repolens Core: repository model, module resolution, and call graph construction

pub mod analysis;
pub mod builder;
pub mod graph;
pub mod model;
pub mod modules;
pub mod resolver;
pub mod symbols;
pub mod tree;


pub use analysis::{
    CallSite, ClassRole, ClassSymbol, Controller, DatabaseUsage, DecoratorKind, DecoratorSymbol,
    Endpoint, FileAnalysis, FileInsight, FunctionRole, FunctionSymbol, ImportRecord, ModelSymbol,
    NamedSymbol, RepositoryAnalysis, RepositoryStats,
};
pub use builder::{backfill_calls, build_call_graph};
pub use graph::{CallGraph, ClusterIndex, EdgeKind, GraphEdge, GraphNode, NodeKind};
pub use model::{FileDescriptor, FileEntry, Language, LanguageFamily, is_text_file};
pub use modules::ModuleGraph;
pub use resolver::ModuleResolver;
pub use symbols::DefinitionIndex;
pub use tree::{FileTree, TreeNode};
