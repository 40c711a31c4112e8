use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

/// Batch-level failures surfaced to the caller.
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("no files found to analyze")]
    EmptyRepository,

    #[error("failed to read {path}: {source}")]
    Source {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid root directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("invalid exclude pattern: {0}")]
    Config(#[from] globset::Error),

    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Per-file guards; the extraction wrapper turns these into an empty result.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("content looks binary")]
    Binary,

    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}
