//! Helpers shared by the lexical extractors

use once_cell::sync::Lazy;
use regex::Regex;
use repolens_core::model::file_stem;
use repolens_core::{CallSite, FileAnalysis, FunctionRole, FunctionSymbol};
use std::collections::HashSet;

static ASYNC_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\basync\b").unwrap());

/// Byte offsets of line starts, for offset-to-line lookups.
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        LineIndex {
            newlines: content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// 1-based line containing byte `offset`.
    pub fn line_of(&self, offset: usize) -> u32 {
        (self.newlines.partition_point(|&nl| nl < offset) + 1) as u32
    }
}

/// Whether the literal token `async` appears in the `window` bytes before `offset`.
pub fn preceded_by_async(content: &str, offset: usize, window: usize) -> bool {
    let mut start = offset.saturating_sub(window);
    while !content.is_char_boundary(start) {
        start += 1;
    }
    ASYNC_TOKEN.is_match(&content[start..offset])
}

/// Collects function records for one file, dropping repeated `(name, line)` hits.
pub struct FunctionCollector<'a> {
    file: &'a str,
    keywords: &'a [&'a str],
    seen: HashSet<(String, u32)>,
    functions: Vec<FunctionSymbol>,
}

impl<'a> FunctionCollector<'a> {
    pub fn new(file: &'a str, keywords: &'a [&'a str]) -> Self {
        FunctionCollector {
            file,
            keywords,
            seen: HashSet::new(),
            functions: Vec::new(),
        }
    }

    /// Names that are keywords or a single character are not functions.
    pub fn accepts(&self, name: &str) -> bool {
        name.chars().count() > 1 && !self.keywords.contains(&name)
    }

    pub fn push(&mut self, name: &str, line: u32, is_async: bool) {
        if !self.accepts(name) || !self.seen.insert((name.to_string(), line)) {
            return;
        }
        self.functions.push(FunctionSymbol {
            name: name.to_string(),
            file: self.file.to_string(),
            line: Some(line),
            is_async,
            role: FunctionRole::Function,
            calls: Vec::new(),
        });
    }

    pub fn finish(self) -> Vec<FunctionSymbol> {
        self.functions
    }
}

/// Record every `identifier(` occurrence not on the exclusion list.
pub fn collect_calls(
    analysis: &mut FileAnalysis,
    pattern: &Regex,
    content: &str,
    file: &str,
    lines: &LineIndex,
    excluded: &[&[&str]],
) {
    for caps in pattern.captures_iter(content) {
        let Some(name) = caps.get(1) else { continue };
        let text = name.as_str();
        if text.chars().count() <= 2 || excluded.iter().any(|list| list.contains(&text)) {
            continue;
        }
        analysis.calls.push(CallSite {
            name: text.to_string(),
            file: file.to_string(),
            line: lines.line_of(name.start()),
        });
    }
}

/// Name used for symbols inferred from a file's path rather than its text.
pub fn path_symbol_name(path: &str) -> String {
    file_stem(path).to_string()
}

/// Lowercased path contains any of `needles`.
pub fn path_mentions(path: &str, needles: &[&str]) -> bool {
    let lower = path.to_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

/// Tag a utils/helper file with a pseudo-function named after the file.
pub fn push_utility(analysis: &mut FileAnalysis, path: &str) {
    analysis.functions.push(FunctionSymbol {
        name: path_symbol_name(path),
        file: path.to_string(),
        line: None,
        is_async: false,
        role: FunctionRole::Utility,
        calls: Vec::new(),
    });
}
