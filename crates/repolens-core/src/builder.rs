//! Call graph construction from an aggregated analysis

use crate::analysis::RepositoryAnalysis;
use crate::graph::{CallGraph, EdgeKind, GraphEdge, GraphNode, NodeKind};
use crate::symbols::DefinitionIndex;
use std::collections::HashMap;

/// Build nodes, call edges and import edges for a whole repository.
///
/// Must run after every extraction task has settled; `analysis` is only read.
pub fn build_call_graph(analysis: &RepositoryAnalysis) -> CallGraph {
    let mut graph = CallGraph::new();
    let mut index = DefinitionIndex::new();

    for function in &analysis.functions {
        let id = GraphNode::node_id(&function.file, &function.name);
        insert_node(
            &mut graph,
            GraphNode {
                id: id.clone(),
                label: function.name.clone(),
                file: function.file.clone(),
                kind: NodeKind::Function,
                line: function.line,
                is_async: Some(function.is_async),
            },
        );
        index.insert(&function.name, id.clone());
        if let Some(line) = function.line {
            index.insert_position(&function.file, line, id);
        }
    }
    index.freeze();

    for class in &analysis.classes {
        insert_symbol(&mut graph, &class.file, &class.name, NodeKind::Class, class.line);
    }
    for component in &analysis.components {
        insert_symbol(
            &mut graph,
            &component.file,
            &component.name,
            NodeKind::Component,
            Some(component.line),
        );
    }
    for model in &analysis.models {
        insert_symbol(&mut graph, &model.file, &model.name, NodeKind::Model, Some(model.line));
    }
    for controller in &analysis.controllers {
        insert_symbol(
            &mut graph,
            &controller.file,
            &controller.name,
            NodeKind::Controller,
            None,
        );
    }

    for call in &analysis.calls {
        let Some(target) = index.lookup(&call.name) else {
            continue;
        };
        let (from, kind) = match index.enclosing_function(&call.file, call.line) {
            Some(caller) => (caller.to_string(), EdgeKind::Call),
            None => (call.file.clone(), EdgeKind::TopLevelCall),
        };
        if from == target {
            continue;
        }
        graph.add_edge(GraphEdge {
            from,
            to: target.to_string(),
            kind,
            line: Some(call.line),
        });
    }

    for import in &analysis.imports {
        graph.add_edge(GraphEdge {
            from: import.file.clone(),
            to: import.specifier.clone(),
            kind: EdgeKind::Import,
            line: Some(import.line),
        });
    }

    tracing::info!(
        "Built call graph with {} nodes, {} edges ({} definitions)",
        graph.node_count(),
        graph.edge_count(),
        index.len()
    );
    graph
}

fn insert_symbol(graph: &mut CallGraph, file: &str, name: &str, kind: NodeKind, line: Option<u32>) {
    insert_node(
        graph,
        GraphNode {
            id: GraphNode::node_id(file, name),
            label: name.to_string(),
            file: file.to_string(),
            kind,
            line,
            is_async: None,
        },
    );
}

fn insert_node(graph: &mut CallGraph, node: GraphNode) {
    let (kind, id) = (node.kind, node.id.clone());
    if !graph.upsert_node(node) {
        tracing::debug!("Node id {} already taken by another kind, clustering only", id);
    }
    graph.clusters.push(kind, id);
}

/// Fill each function's `calls` with the labels of its outgoing call targets.
pub fn backfill_calls(analysis: &mut RepositoryAnalysis, graph: &CallGraph) {
    let mut callees: HashMap<&str, Vec<String>> = HashMap::new();
    for edge in graph.edges_of_kind(EdgeKind::Call) {
        let Some(label) = graph.node(&edge.to).map(|n| n.label.clone()) else {
            continue;
        };
        let labels = callees.entry(edge.from.as_str()).or_default();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    for function in &mut analysis.functions {
        let id = GraphNode::node_id(&function.file, &function.name);
        function.calls = callees.get(id.as_str()).cloned().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CallSite, ClassRole, ClassSymbol, FunctionRole, FunctionSymbol, ImportRecord};

    fn function(file: &str, name: &str, line: u32) -> FunctionSymbol {
        FunctionSymbol {
            name: name.to_string(),
            file: file.to_string(),
            line: Some(line),
            is_async: false,
            role: FunctionRole::Function,
            calls: Vec::new(),
        }
    }

    fn call(file: &str, name: &str, line: u32) -> CallSite {
        CallSite {
            name: name.to_string(),
            file: file.to_string(),
            line,
        }
    }

    #[test]
    fn test_attributes_to_nearest_function_above() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![
            function("a.js", "first", 1),
            function("a.js", "second", 10),
            function("b.js", "target", 1),
        ];
        analysis.calls = vec![call("a.js", "target", 4), call("a.js", "target", 12)];

        let graph = build_call_graph(&analysis);
        assert!(graph.has_edge_between("a.js:first", "b.js:target", EdgeKind::Call));
        assert!(graph.has_edge_between("a.js:second", "b.js:target", EdgeKind::Call));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_call_before_any_function_is_top_level() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![function("a.js", "later", 20), function("b.js", "setup", 1)];
        analysis.calls = vec![call("a.js", "setup", 2)];

        let graph = build_call_graph(&analysis);
        let edges: Vec<_> = graph.edges_from("a.js").collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].kind, EdgeKind::TopLevelCall);
        assert_eq!(edges[0].to, "b.js:setup");
    }

    #[test]
    fn test_recursive_call_is_not_an_edge() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![function("a.js", "walk", 1)];
        analysis.calls = vec![call("a.js", "walk", 3)];

        let graph = build_call_graph(&analysis);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_unknown_call_and_imports() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![function("a.js", "main", 1)];
        analysis.calls = vec![call("a.js", "fetchData", 2)];
        analysis.imports = vec![ImportRecord {
            file: "a.js".to_string(),
            specifier: "react".to_string(),
            line: 1,
        }];

        let graph = build_call_graph(&analysis);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge_between("a.js", "react", EdgeKind::Import));
    }

    #[test]
    fn test_clusters_and_kind_collisions() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![function("svc.js", "UserService", 3)];
        analysis.classes = vec![ClassSymbol {
            name: "UserService".to_string(),
            file: "svc.js".to_string(),
            line: Some(1),
            role: ClassRole::Class,
        }];

        let graph = build_call_graph(&analysis);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.clusters.functions, vec!["svc.js:UserService"]);
        assert_eq!(graph.clusters.classes, vec!["svc.js:UserService"]);
    }

    #[test]
    fn test_duplicate_definition_is_clustered_once() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![function("f.py", "__init__", 2), function("f.py", "__init__", 9)];

        let graph = build_call_graph(&analysis);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("f.py:__init__").and_then(|n| n.line), Some(9));
        assert_eq!(graph.clusters.functions, vec!["f.py:__init__"]);
    }

    #[test]
    fn test_backfill_calls_dedupes_labels() {
        let mut analysis = RepositoryAnalysis::new();
        analysis.functions = vec![function("a.js", "main", 1), function("b.js", "helper", 1)];
        analysis.calls = vec![call("a.js", "helper", 2), call("a.js", "helper", 3)];

        let graph = build_call_graph(&analysis);
        backfill_calls(&mut analysis, &graph);
        assert_eq!(analysis.functions[0].calls, vec!["helper"]);
        assert!(analysis.functions[1].calls.is_empty());
    }
}
