//! Call/import graph produced from a repository analysis

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discriminates what kind of symbol a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Function,
    Class,
    Component,
    Model,
    Controller,
}

/// A symbol node. `id` is `file + ":" + name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
}

impl GraphNode {
    pub fn node_id(file: &str, name: &str) -> String {
        format!("{file}:{name}")
    }
}

/// What kind of relationship this edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// From the attributing function to the callee.
    Call,
    /// From a file path to the callee, when no function precedes the call.
    TopLevelCall,
    /// From a file path to a raw import specifier.
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Node ids grouped by symbol kind, for presentation only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterIndex {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub components: Vec<String>,
    pub models: Vec<String>,
    pub controllers: Vec<String>,
}

impl ClusterIndex {
    /// Add `id` to the cluster for `kind`, unless it is already listed.
    pub fn push(&mut self, kind: NodeKind, id: String) {
        let cluster = match kind {
            NodeKind::Function => &mut self.functions,
            NodeKind::Class => &mut self.classes,
            NodeKind::Component => &mut self.components,
            NodeKind::Model => &mut self.models,
            NodeKind::Controller => &mut self.controllers,
        };
        if !cluster.contains(&id) {
            cluster.push(id);
        }
    }

    pub fn get(&self, kind: NodeKind) -> &[String] {
        match kind {
            NodeKind::Function => &self.functions,
            NodeKind::Class => &self.classes,
            NodeKind::Component => &self.components,
            NodeKind::Model => &self.models,
            NodeKind::Controller => &self.controllers,
        }
    }
}

/// Symbol nodes plus call and import edges in one edge set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GraphParts")]
pub struct CallGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub clusters: ClusterIndex,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct GraphParts {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(default)]
    clusters: ClusterIndex,
}

impl From<GraphParts> for CallGraph {
    fn from(parts: GraphParts) -> Self {
        let positions = parts
            .nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.id.clone(), pos))
            .collect();
        CallGraph {
            nodes: parts.nodes,
            edges: parts.edges,
            clusters: parts.clusters,
            positions,
        }
    }
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or overwrite the data of an existing node with the same id
    /// and kind. Returns false when the id is already held by another kind.
    pub fn upsert_node(&mut self, node: GraphNode) -> bool {
        match self.positions.get(&node.id) {
            Some(&pos) if self.nodes[pos].kind == node.kind => {
                self.nodes[pos] = node;
                true
            }
            Some(_) => false,
            None => {
                self.positions.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
                true
            }
        }
    }

    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    /// Get a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.positions.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of `call` and `top-level-call` edges.
    pub fn call_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|e| matches!(e.kind, EdgeKind::Call | EdgeKind::TopLevelCall))
            .count()
    }

    /// Get all outgoing edges from a node or file.
    pub fn edges_from<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.from == from)
    }

    /// Get all incoming edges to a node or specifier.
    pub fn edges_to<'a>(&'a self, to: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.to == to)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Check if an edge exists between two endpoints of a specific kind.
    pub fn has_edge_between(&self, from: &str, to: &str, kind: EdgeKind) -> bool {
        self.edges_from(from).any(|e| e.to == to && e.kind == kind)
    }

    /// Get all nodes of a specific kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }
}
