//! File-to-file module dependency view over resolved imports

use crate::analysis::ImportRecord;
use crate::resolver::ModuleResolver;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Directed graph of files linked by imports that resolve inside the repository.
///
/// Used for the dependency diagram only; the call graph keeps raw import edges.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    inner: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    pub fn build(imports: &[ImportRecord], resolver: &ModuleResolver) -> Self {
        let mut graph = ModuleGraph::default();
        for import in imports {
            let from = import.file.replace('\\', "/");
            if !resolver.contains(&from) {
                continue;
            }
            let Some(to) = resolver.resolve(&from, &import.specifier) else {
                continue;
            };
            if from == to || !resolver.contains(&to) {
                continue;
            }
            let a = graph.node_for(&from);
            let b = graph.node_for(&to);
            if graph.inner.find_edge(a, b).is_none() {
                graph.inner.add_edge(a, b, ());
            }
        }
        tracing::debug!(
            "Module graph: {} files, {} dependencies",
            graph.inner.node_count(),
            graph.inner.edge_count()
        );
        graph
    }

    fn node_for(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(path) {
            return idx;
        }
        let idx = self.inner.add_node(path.to_string());
        self.indices.insert(path.to_string(), idx);
        idx
    }

    /// Files taking part in at least one dependency, in first-appearance order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.inner.node_weights().map(String::as_str)
    }

    /// `(importer, imported)` pairs in discovery order.
    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.raw_edges().iter().map(move |edge| {
            (
                self.inner[edge.source()].as_str(),
                self.inner[edge.target()].as_str(),
            )
        })
    }

    pub fn file_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn dependency_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Files imported by `path`.
    pub fn imports_of<'a>(&'a self, path: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.indices
            .get(path)
            .into_iter()
            .flat_map(move |&idx| self.inner.neighbors(idx))
            .map(move |idx| self.inner[idx].as_str())
    }
}
