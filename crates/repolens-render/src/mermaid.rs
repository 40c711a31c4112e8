//! Mermaid renderings: architecture mind map, module dependencies, directory tree
//!
//! Every function returns a syntactically valid diagram, including for empty
//! input, where only the header and root are emitted.

use crate::limits::DisplayLimits;
use repolens_core::{FileEntry, ModuleGraph, RepositoryAnalysis};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

const MINDMAP_SPECIAL: &[char] = &['"', '(', ')', '[', ']', ','];

/// Strip characters that change node shape in a mind map, trim, and cap length.
pub fn clean_label(text: &str, max_chars: usize) -> String {
    let stripped: String = text.chars().filter(|c| !MINDMAP_SPECIAL.contains(c)).collect();
    let trimmed: String = stripped.trim().chars().take(max_chars).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Quoted labels in flowcharts only need their double quotes replaced.
fn quote_label(text: &str) -> String {
    text.replace('"', "'")
}

struct MindmapWriter<'a> {
    out: String,
    limits: &'a DisplayLimits,
}

impl MindmapWriter<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        let _ = writeln!(self.out, "{}{}", "  ".repeat(depth), text);
    }

    /// Up to `cap` labels, then a `+N more` marker for the rest.
    fn capped<'n>(&mut self, depth: usize, names: impl ExactSizeIterator<Item = &'n str>, cap: usize) {
        let total = names.len();
        for name in names.take(cap) {
            let label = clean_label(name, self.limits.label_chars);
            self.line(depth, &label);
        }
        if total > cap {
            self.line(depth, &format!("+{} more", total - cap));
        }
    }
}

/// Hierarchical overview: Frontend, Backend, API and Data branches.
pub fn mindmap_diagram(analysis: &RepositoryAnalysis, limits: &DisplayLimits) -> String {
    let mut w = MindmapWriter {
        out: String::from("mindmap\n"),
        limits,
    };
    w.line(1, "root((Repository))");

    if !analysis.components.is_empty() {
        w.line(2, "Frontend");
        let names = analysis.components.iter().map(|c| c.name.as_str());
        w.capped(3, names, limits.components);
    }

    if !analysis.functions.is_empty() || !analysis.classes.is_empty() {
        w.line(2, "Backend");
        if !analysis.classes.is_empty() {
            w.line(3, "Classes");
            w.capped(4, analysis.classes.iter().map(|c| c.name.as_str()), limits.classes);
        }
        if !analysis.functions.is_empty() {
            w.line(3, "Functions");
            w.capped(4, analysis.functions.iter().map(|f| f.name.as_str()), limits.functions);
        }
    }

    if !analysis.endpoints.is_empty() {
        w.line(2, "API");
        let mut methods: Vec<(&str, Vec<&str>)> = Vec::new();
        for endpoint in &analysis.endpoints {
            let method = if endpoint.method.is_empty() {
                "GET"
            } else {
                endpoint.method.as_str()
            };
            match methods.iter_mut().find(|(m, _)| *m == method) {
                Some((_, paths)) => paths.push(endpoint.path.as_str()),
                None => methods.push((method, vec![endpoint.path.as_str()])),
            }
        }
        for (method, paths) in methods {
            w.line(3, &clean_label(method, limits.label_chars));
            w.capped(4, paths.into_iter(), limits.endpoints_per_method);
        }
    }

    if !analysis.models.is_empty() || !analysis.databases.is_empty() {
        w.line(2, "Data");
        if !analysis.databases.is_empty() {
            w.line(3, "Databases");
            let mut seen = HashSet::new();
            for db in &analysis.databases {
                if seen.insert((db.kind.as_str(), db.orm.as_str())) {
                    let label = format!(
                        "{} via {}",
                        clean_label(&db.kind, limits.label_chars),
                        clean_label(&db.orm, limits.label_chars)
                    );
                    w.line(4, &label);
                }
            }
        }
        if !analysis.models.is_empty() {
            w.line(3, "Models");
            w.capped(4, analysis.models.iter().map(|m| m.name.as_str()), limits.models);
        }
    }

    w.out
}

/// Hands out short sequential node ids, one per distinct key.
#[derive(Default)]
struct NodeIds {
    ids: HashMap<String, String>,
}

impl NodeIds {
    /// Returns the id and whether it was newly allocated.
    fn id_for(&mut self, prefix: &str, key: &str) -> (String, bool) {
        let full_key = format!("{prefix}:{key}");
        if let Some(id) = self.ids.get(&full_key) {
            return (id.clone(), false);
        }
        let id = format!("{prefix}{}", self.ids.len());
        self.ids.insert(full_key, id.clone());
        (id, true)
    }
}

/// File-to-file import graph, capped at `limits.module_edges` edges.
pub fn module_dependency_diagram(modules: &ModuleGraph, limits: &DisplayLimits) -> String {
    let mut out = String::from("graph LR\n");
    out.push_str("  classDef file fill:#0ea5e9,stroke:#0c4a6e,stroke-width:2px,color:#001219;\n");

    let edges: Vec<(&str, &str)> = modules.dependencies().collect();
    let kept = &edges[..edges.len().min(limits.module_edges)];

    let mut ids = NodeIds::default();
    let mut lines = Vec::with_capacity(kept.len());
    for &(from, to) in kept {
        let mut endpoint = |path: &str, out: &mut String| {
            let (id, fresh) = ids.id_for("m", path);
            if fresh {
                let _ = writeln!(out, "  {}(\"{}\"):::file", id, quote_label(path));
            }
            id
        };
        let a = endpoint(from, &mut out);
        let b = endpoint(to, &mut out);
        lines.push(format!("  {a} --> {b}\n"));
    }
    for line in lines {
        out.push_str(&line);
    }

    if edges.len() > kept.len() {
        let _ = writeln!(out, "  %% truncated {} edges for size", edges.len() - kept.len());
        tracing::debug!("Module diagram truncated to {} edges", kept.len());
    }
    out
}

/// Directory hierarchy of the first `limits.tree_files` files in listing order.
pub fn directory_tree_diagram(files: &[FileEntry], limits: &DisplayLimits) -> String {
    let mut out = String::from("graph TD\n");
    out.push_str("  classDef dir fill:#22c55e,stroke:#14532d,stroke-width:2px,color:#052e16;\n");
    out.push_str("  classDef file fill:#eab308,stroke:#713f12,stroke-width:2px,color:#1f1300;\n");

    let mut ids = NodeIds::default();
    let (root, _) = ids.id_for("d", "/");
    let _ = writeln!(out, "  {root}(\"/\"):::dir");

    let mut edges = HashSet::new();
    for file in files.iter().take(limits.tree_files) {
        let parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
        let mut parent = root.clone();
        let mut walked = String::new();
        for (i, part) in parts.iter().enumerate() {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(part);
            let is_leaf = i + 1 == parts.len();
            let (prefix, class, label) = if is_leaf {
                ("f", "file", quote_label(part))
            } else {
                ("d", "dir", format!("{}/", quote_label(part)))
            };
            let (id, fresh) = ids.id_for(prefix, &walked);
            if fresh {
                let _ = writeln!(out, "  {id}(\"{label}\"):::{class}");
            }
            if edges.insert((parent.clone(), id.clone())) {
                let _ = writeln!(out, "  {parent} --> {id}");
            }
            parent = id;
        }
    }

    if files.len() > limits.tree_files {
        let _ = writeln!(out, "  %% truncated {} files for size", files.len() - limits.tree_files);
    }
    out
}
