//! Language extractor trait definition

use crate::error::ExtractError;
use crate::languages::get_extractor;
use repolens_core::{FileAnalysis, FileDescriptor, LanguageFamily};

/// Lexical symbol extraction for one language family.
///
/// Implementations hold no state between calls, so extracting the same
/// content twice yields identical records.
pub trait LanguageExtractor: Send + Sync {
    fn family(&self) -> LanguageFamily;

    /// Scan `content` of the file at `path` and return everything found.
    fn extract(&self, path: &str, content: &str) -> FileAnalysis;
}

/// Reject content that would only produce noise: binaries and oversized files.
pub fn check_content(content: &str, max_bytes: usize) -> Result<(), ExtractError> {
    if content.len() > max_bytes {
        return Err(ExtractError::TooLarge {
            size: content.len(),
            limit: max_bytes,
        });
    }
    if content.as_bytes().contains(&0) {
        return Err(ExtractError::Binary);
    }
    Ok(())
}

/// Extract a file, or explain why it was skipped.
///
/// Files without a supported family produce an empty record.
pub fn try_extract(file: &FileDescriptor, max_bytes: usize) -> Result<FileAnalysis, ExtractError> {
    let Some(family) = file.language_family else {
        return Ok(FileAnalysis::default());
    };
    check_content(&file.content, max_bytes)?;
    Ok(get_extractor(family).extract(&file.path, &file.content))
}

/// Extract a file, degrading any failure to an empty record.
pub fn extract_file(file: &FileDescriptor, max_bytes: usize) -> FileAnalysis {
    match try_extract(file, max_bytes) {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!("Skipping extraction for {}: {}", file.path, e);
            FileAnalysis::default()
        }
    }
}
