//! Where file listings and contents come from

use crate::config::IndexerConfig;
use crate::error::{IndexerError, Result};
use async_trait::async_trait;
use globset::GlobSet;
use ignore::WalkBuilder;
use repolens_core::{FileDescriptor, FileEntry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supplies the repository file list and, on demand, file contents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable name of the repository root.
    fn name(&self) -> String;

    /// Every file under the root, skip rules applied, sorted by path.
    async fn list_files(&self) -> Result<Vec<FileEntry>>;

    /// Text content of `path`, or `None` when it is not valid UTF-8.
    async fn read(&self, path: &str) -> Result<Option<String>>;
}

/// A directory on the local filesystem.
pub struct LocalSource {
    root: PathBuf,
    skip_dirs: Vec<String>,
    exclude: GlobSet,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>, config: &IndexerConfig) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IndexerError::InvalidRoot(root));
        }
        Ok(LocalSource {
            root,
            skip_dirs: config.skip_dirs.clone(),
            exclude: config.exclude_set()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(root: &Path, skip_dirs: &[String], exclude: &GlobSet) -> Result<Vec<FileEntry>> {
        let skip: Vec<String> = skip_dirs.to_vec();
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && skip.iter().any(|d| entry.file_name() == d.as_str()))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            if exclude.is_match(&relative) {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(FileEntry::new(relative, size));
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

#[async_trait]
impl ContentSource for LocalSource {
    fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>> {
        let root = self.root.clone();
        let skip_dirs = self.skip_dirs.clone();
        let exclude = self.exclude.clone();
        tokio::task::spawn_blocking(move || Self::walk(&root, &skip_dirs, &exclude))
            .await
            .map_err(|e| IndexerError::Io(std::io::Error::other(e)))?
    }

    async fn read(&self, path: &str) -> Result<Option<String>> {
        let bytes = tokio::fs::read(self.root.join(path))
            .await
            .map_err(|source| IndexerError::Source {
                path: path.to_string(),
                source,
            })?;
        Ok(String::from_utf8(bytes).ok())
    }
}

/// Files already held in memory, for callers that fetch content themselves.
pub struct MemorySource {
    name: String,
    files: Vec<FileDescriptor>,
    by_path: HashMap<String, usize>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, files: Vec<FileDescriptor>) -> Self {
        let by_path = files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.path.clone(), i))
            .collect();
        MemorySource {
            name: name.into(),
            files,
            by_path,
        }
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>> {
        Ok(self
            .files
            .iter()
            .map(|f| FileEntry::new(f.path.clone(), f.content.len() as u64))
            .collect())
    }

    async fn read(&self, path: &str) -> Result<Option<String>> {
        match self.by_path.get(path) {
            Some(&i) => Ok(Some(self.files[i].content.clone())),
            None => Err(IndexerError::Source {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in source"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[tokio::test]
    async fn test_local_listing_skips_dependency_dirs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/app.js", "app()");
        write(dir.path(), "src/lib/util.py", "def util(): pass");
        write(dir.path(), "node_modules/react/index.js", "module.exports = {}");
        write(dir.path(), ".git/HEAD", "ref: main");
        write(dir.path(), "dist/bundle.js", "");
        write(dir.path(), ".env", "KEY=1");

        let source = LocalSource::new(dir.path(), &IndexerConfig::default()).unwrap();
        let files = source.list_files().await.unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(paths, vec![".env", "src/app.js", "src/lib/util.py"]);
        assert!(files.iter().all(|f| f.is_text));
    }

    #[tokio::test]
    async fn test_exclude_globs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "web/app.min.js", "x");
        write(dir.path(), "web/app.js", "x");

        let config = IndexerConfig {
            exclude: vec!["**/*.min.js".to_string()],
            ..Default::default()
        };
        let source = LocalSource::new(dir.path(), &config).unwrap();
        let paths: Vec<_> = source
            .list_files()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(paths, vec!["web/app.js"]);
    }

    #[tokio::test]
    async fn test_read_contents() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.py", "print('hi')");
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00]).unwrap();

        let source = LocalSource::new(dir.path(), &IndexerConfig::default()).unwrap();
        assert_eq!(source.read("main.py").await.unwrap().as_deref(), Some("print('hi')"));
        assert_eq!(source.read("blob.bin").await.unwrap(), None);
        assert!(matches!(
            source.read("missing.py").await,
            Err(IndexerError::Source { .. })
        ));
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let result = LocalSource::new("/definitely/not/here", &IndexerConfig::default());
        assert!(matches!(result, Err(IndexerError::InvalidRoot(_))));
    }
}
