//! Integration tests for Repolens
//!
//! These tests index real directories on disk and drive the CLI binary.

use repolens_core::{EdgeKind, NodeKind};
use repolens_indexer::{Coordinator, IndexerConfig, IndexerError, LocalSource};
use repolens_render::{DisplayLimits, module_dependency_diagram};
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

const ROUTES: &str = "const express = require('express');
const router = express.Router();
const { findUser } = require('../services/userService');

router.get('/users/:id', async (req, res) => {
  res.json(findUser(req.params.id));
});

module.exports = router;
";

const SERVICE: &str = "const users = new Map();

function findUser(id) {
  return users.get(id);
}

module.exports = { findUser };
";

const MODELS: &str = "from django.db import models


class Article(models.Model):
    title = models.CharField(max_length=200)
";

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, content).unwrap();
}

fn sample_repository() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "server/routes/users.js", ROUTES);
    write(dir.path(), "server/services/userService.js", SERVICE);
    write(dir.path(), "app/models.py", MODELS);
    write(dir.path(), "README.md", "# Sample\n");
    write(dir.path(), "node_modules/express/index.js", "function app() {}\n");
    dir
}

async fn index(root: &Path, config: IndexerConfig) -> repolens_indexer::RepositoryIndex {
    let source = LocalSource::new(root, &config).unwrap();
    Coordinator::new(Arc::new(source), config)
        .run_full_index()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_index_local_repository() {
    let dir = sample_repository();
    let index = index(dir.path(), IndexerConfig::default()).await;

    let paths: Vec<_> = index.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "README.md",
            "app/models.py",
            "server/routes/users.js",
            "server/services/userService.js",
        ]
    );

    let endpoint = &index.analysis.endpoints[0];
    assert_eq!(
        (endpoint.method.as_str(), endpoint.path.as_str(), endpoint.line),
        ("GET", "/users/:id", 5)
    );
    assert!(index.analysis.controllers.iter().any(|c| c.name == "users"));

    let top_level: Vec<_> = index.graph.edges_of_kind(EdgeKind::TopLevelCall).collect();
    assert_eq!(top_level.len(), 1);
    assert_eq!(top_level[0].from, "server/routes/users.js");
    assert_eq!(top_level[0].to, "server/services/userService.js:findUser");
    assert_eq!(top_level[0].line, Some(6));
    assert!(index.graph.edges_of_kind(EdgeKind::Call).next().is_none());

    let deps: Vec<_> = index.modules.dependencies().collect();
    assert_eq!(deps, vec![("server/routes/users.js", "server/services/userService.js")]);

    let model = &index.analysis.models[0];
    assert_eq!((model.name.as_str(), model.orm.as_str()), ("Article", "django"));
    // The class node claims the id first; the model only joins its cluster
    let node = index.graph.node("app/models.py:Article").unwrap();
    assert_eq!(node.kind, NodeKind::Class);
    assert!(index.graph.clusters.get(NodeKind::Model).contains(&node.id));
    assert!(index.analysis.databases.iter().any(|d| d.kind == "Django ORM"));

    let diagram = module_dependency_diagram(&index.modules, &DisplayLimits::default());
    assert!(diagram.contains("m0(\"server/routes/users.js\"):::file"));
    assert!(diagram.contains("m0 --> m1"));
}

#[tokio::test]
async fn test_many_files_with_small_concurrency() {
    let dir = TempDir::new().unwrap();
    for i in 0..30 {
        write(
            dir.path(),
            &format!("pkg/mod{i:02}.py"),
            &format!("def task_{i}():\n    return {i}\n"),
        );
    }
    let config = IndexerConfig {
        concurrency: 4,
        ..Default::default()
    };
    let index = index(dir.path(), config).await;

    let names: Vec<_> = index.analysis.functions.iter().map(|f| f.name.clone()).collect();
    let expected: Vec<_> = (0..30).map(|i| format!("task_{i}")).collect();
    assert_eq!(names, expected);
    assert_eq!(index.stats.functions, 30);
}

#[tokio::test]
async fn test_empty_directory_fails_the_batch() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "node_modules/a/index.js", "x");
    let config = IndexerConfig::default();
    let source = LocalSource::new(dir.path(), &config).unwrap();
    let result = Coordinator::new(Arc::new(source), config).run_full_index().await;
    assert!(matches!(result, Err(IndexerError::EmptyRepository)));
}

fn repolens(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_repolens"))
        .args(args)
        .env("REPOLENS_PROVIDER", "heuristic")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute repolens")
}

#[test]
fn test_cli_help() {
    let output = repolens(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("repolens"));
    assert!(stdout.contains("analyze"));
}

#[test]
fn test_cli_analyze_report() {
    let dir = sample_repository();
    let root = dir.path().to_str().unwrap();
    let output = repolens(&["--root", root, "analyze"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["generatedAt"].is_string());
    assert_eq!(report["stats"]["files"], 4);
    assert_eq!(report["stats"]["apis"], 1);
    assert_eq!(report["endpoints"][0]["path"], "/users/:id");
    assert_eq!(report["summarySource"], "Heuristic");
    assert!(report["mermaidDiagram"].as_str().unwrap().starts_with("mindmap\n"));
    assert!(report["moduleDependencyDiagram"].as_str().unwrap().starts_with("graph LR\n"));
    assert!(report["directoryTreeDiagram"].as_str().unwrap().starts_with("graph TD\n"));
    assert!(report["markdownDigest"].as_str().unwrap().contains("## API Endpoints (1)"));
    assert!(report["callGraph"]["edges"].is_array());
    assert!(report["fileTree"].is_array());
}

#[test]
fn test_cli_diagram_and_digest() {
    let dir = sample_repository();
    let root = dir.path().to_str().unwrap();

    let tree = repolens(&["--root", root, "diagram", "--kind", "tree"]);
    let tree = String::from_utf8_lossy(&tree.stdout);
    assert!(tree.starts_with("graph TD\n"));
    assert!(tree.contains("(\"userService.js\"):::file"));

    let digest = repolens(&["--root", root, "digest"]);
    let digest = String::from_utf8_lossy(&digest.stdout);
    assert!(digest.contains("- **GET** `/users/:id` (express) in `server/routes/users.js`"));
}
