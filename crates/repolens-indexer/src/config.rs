//! Indexer settings

use crate::rules::DEFAULT_SKIP_DIRS;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Maximum number of file tasks in flight.
    pub concurrency: usize,
    /// Files larger than this are not scanned for symbols.
    pub max_file_bytes: usize,
    /// Directory names skipped at any depth.
    pub skip_dirs: Vec<String>,
    /// Extra glob patterns, matched against repo-relative paths.
    pub exclude: Vec<String>,
    /// Ask the summarizer for a per-file insight.
    pub deep_analysis: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            concurrency: DEFAULT_CONCURRENCY,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            exclude: Vec::new(),
            deep_analysis: false,
        }
    }
}

impl IndexerConfig {
    pub fn exclude_set(&self) -> Result<GlobSet, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern)?);
        }
        builder.build()
    }

    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }
}
