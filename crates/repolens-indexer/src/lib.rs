//! File discovery, symbol extraction, and the batch coordinator

pub mod config;
pub mod coordinator;
pub mod databases;
pub mod error;
pub mod extractor;
pub mod languages;
pub mod limiter;
pub mod rules;
pub mod source;


pub use config::IndexerConfig;
pub use coordinator::{Coordinator, RepositoryIndex};
pub use databases::detect_databases;
pub use error::{ExtractError, IndexerError, Result};
pub use extractor::{LanguageExtractor, extract_file, try_extract};
pub use limiter::limit_concurrency;
pub use source::{ContentSource, LocalSource, MemorySource};
