//! Extracted symbol records and the repository-wide accumulator

use serde::{Deserialize, Serialize};

/// How a function record was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionRole {
    /// Matched a declaration pattern.
    Function,
    /// Named after a utils/helper file rather than found in its text.
    Utility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSymbol {
    pub name: String,
    pub file: String,
    pub line: Option<u32>,
    #[serde(rename = "async")]
    pub is_async: bool,
    #[serde(rename = "type")]
    pub role: FunctionRole,
    /// Labels of functions this one calls; filled after graph construction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassRole {
    Class,
    /// Named after a service file.
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSymbol {
    pub name: String,
    pub file: String,
    pub line: Option<u32>,
    #[serde(rename = "type")]
    pub role: ClassRole,
}

/// A named symbol with a position: components, hooks and types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSymbol {
    pub name: String,
    pub file: String,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoratorKind {
    Decorator,
    Middleware,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratorSymbol {
    pub name: String,
    pub file: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: DecoratorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Uppercase HTTP verb.
    pub method: String,
    pub path: String,
    pub file: String,
    pub line: u32,
    pub framework: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSymbol {
    pub name: String,
    pub file: String,
    pub line: u32,
    pub orm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    pub name: String,
    pub file: String,
}

/// A raw import/require reference, unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub file: String,
    #[serde(rename = "module")]
    pub specifier: String,
    pub line: u32,
}

/// A syntactic `name(` occurrence, not yet linked to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSite {
    pub name: String,
    pub file: String,
    pub line: u32,
}

/// Database usage found in a file's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseUsage {
    #[serde(rename = "type")]
    pub kind: String,
    /// The evidence token that matched.
    pub orm: String,
    pub file: String,
}

/// Per-file deep insight produced by a summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileInsight {
    pub file: String,
    pub role: String,
    pub patterns: Vec<String>,
    pub purpose: String,
    pub technical_debt: Vec<String>,
    pub insights: Vec<String>,
}

/// Everything extracted from a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub functions: Vec<FunctionSymbol>,
    pub classes: Vec<ClassSymbol>,
    pub imports: Vec<ImportRecord>,
    pub endpoints: Vec<Endpoint>,
    pub models: Vec<ModelSymbol>,
    pub controllers: Vec<Controller>,
    pub hooks: Vec<NamedSymbol>,
    pub components: Vec<NamedSymbol>,
    pub types: Vec<NamedSymbol>,
    pub decorators: Vec<DecoratorSymbol>,
    pub calls: Vec<CallSite>,
}

impl FileAnalysis {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.classes.is_empty()
            && self.imports.is_empty()
            && self.endpoints.is_empty()
            && self.models.is_empty()
            && self.controllers.is_empty()
            && self.hooks.is_empty()
            && self.components.is_empty()
            && self.types.is_empty()
            && self.decorators.is_empty()
            && self.calls.is_empty()
    }
}

/// Accumulated extraction results for a whole repository.
///
/// Built by merging [`FileAnalysis`] values after every extraction task has
/// settled; graph construction reads it afterwards and never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAnalysis {
    pub functions: Vec<FunctionSymbol>,
    pub classes: Vec<ClassSymbol>,
    pub imports: Vec<ImportRecord>,
    pub endpoints: Vec<Endpoint>,
    pub models: Vec<ModelSymbol>,
    pub controllers: Vec<Controller>,
    pub hooks: Vec<NamedSymbol>,
    pub components: Vec<NamedSymbol>,
    pub types: Vec<NamedSymbol>,
    pub decorators: Vec<DecoratorSymbol>,
    pub calls: Vec<CallSite>,
    pub databases: Vec<DatabaseUsage>,
    pub insights: Vec<FileInsight>,
}

impl RepositoryAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's results to the aggregate.
    pub fn merge(&mut self, file: FileAnalysis) {
        self.functions.extend(file.functions);
        self.classes.extend(file.classes);
        self.imports.extend(file.imports);
        self.endpoints.extend(file.endpoints);
        self.models.extend(file.models);
        self.controllers.extend(file.controllers);
        self.hooks.extend(file.hooks);
        self.components.extend(file.components);
        self.types.extend(file.types);
        self.decorators.extend(file.decorators);
        self.calls.extend(file.calls);
    }
}

impl FromIterator<FileAnalysis> for RepositoryAnalysis {
    fn from_iter<I: IntoIterator<Item = FileAnalysis>>(iter: I) -> Self {
        let mut aggregate = RepositoryAnalysis::new();
        for file in iter {
            aggregate.merge(file);
        }
        aggregate
    }
}

/// Headline counts for a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub files: usize,
    pub functions: usize,
    pub classes: usize,
    pub components: usize,
    pub hooks: usize,
    pub types: usize,
    pub imports: usize,
    pub calls: usize,
    pub apis: usize,
    pub databases: usize,
    pub models: usize,
    pub controllers: usize,
    pub decorators: usize,
}

impl RepositoryStats {
    /// `call_edges` is the graph's call edge count, known only after graph construction.
    pub fn collect(files: usize, analysis: &RepositoryAnalysis, call_edges: usize) -> Self {
        RepositoryStats {
            files,
            functions: analysis.functions.len(),
            classes: analysis.classes.len(),
            components: analysis.components.len(),
            hooks: analysis.hooks.len(),
            types: analysis.types.len(),
            imports: analysis.imports.len(),
            calls: call_edges,
            apis: analysis.endpoints.len(),
            databases: analysis.databases.len(),
            models: analysis.models.len(),
            controllers: analysis.controllers.len(),
            decorators: analysis.decorators.len(),
        }
    }
}
