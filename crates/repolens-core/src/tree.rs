//! Nested directory tree of the discovered files

use crate::model::{FileEntry, Language};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Dir {
        name: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        path: String,
        language: Language,
        size: u64,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Dir { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }
}

/// Children of the repository root, directories first, then by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTree(pub Vec<TreeNode>);

#[derive(Default)]
struct DirBuilder {
    dirs: BTreeMap<String, DirBuilder>,
    files: BTreeMap<String, TreeNode>,
}

impl DirBuilder {
    fn finish(self) -> Vec<TreeNode> {
        let mut dirs: Vec<TreeNode> = self
            .dirs
            .into_iter()
            .map(|(name, dir)| TreeNode::Dir {
                name,
                children: dir.finish(),
            })
            .collect();
        let mut files: Vec<TreeNode> = self.files.into_values().collect();
        dirs.sort_by_cached_key(sort_key);
        files.sort_by_cached_key(sort_key);
        dirs.extend(files);
        dirs
    }
}

fn sort_key(node: &TreeNode) -> (String, String) {
    (node.name().to_lowercase(), node.name().to_string())
}

impl FileTree {
    pub fn build(files: &[FileEntry]) -> Self {
        let mut root = DirBuilder::default();
        for file in files {
            let mut parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
            let Some(leaf) = parts.pop() else {
                continue;
            };
            let mut current = &mut root;
            for part in parts {
                current = current.dirs.entry(part.to_string()).or_default();
            }
            current.files.insert(
                leaf.to_string(),
                TreeNode::File {
                    name: leaf.to_string(),
                    path: file.path.clone(),
                    language: file.language,
                    size: file.size,
                },
            );
        }
        FileTree(root.finish())
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_before_files() {
        let files = vec![
            FileEntry::new("README.md", 10),
            FileEntry::new("src/main.py", 20),
            FileEntry::new("src/api/routes.py", 30),
            FileEntry::new("app.py", 5),
        ];
        let tree = FileTree::build(&files);
        let names: Vec<_> = tree.roots().iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["src", "app.py", "README.md"]);

        let TreeNode::Dir { children, .. } = &tree.roots()[0] else {
            panic!("expected a directory");
        };
        assert!(children[0].is_dir());
        assert_eq!(children[1].name(), "main.py");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let tree = FileTree::build(&[FileEntry::new("lib/a.js", 1)]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["type"], "dir");
        assert_eq!(json[0]["children"][0]["type"], "file");
        assert_eq!(json[0]["children"][0]["path"], "lib/a.js");
    }
}
