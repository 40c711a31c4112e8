//! Database usage detection over fetched file contents

use crate::rules::{DATABASE_SIGNATURES, DATABASE_SKIP_EXTENSIONS, DATABASE_SKIP_FILES};
use once_cell::sync::Lazy;
use regex::Regex;
use repolens_core::model::{extension, file_name};
use repolens_core::{DatabaseUsage, FileDescriptor};

/// One compiled matcher per `(database, token)`, in table order.
static MATCHERS: Lazy<Vec<(&'static str, Vec<(&'static str, Regex)>)>> = Lazy::new(|| {
    DATABASE_SIGNATURES
        .iter()
        .map(|(database, tokens)| {
            let compiled = tokens
                .iter()
                .map(|token| (*token, token_regex(token)))
                .collect();
            (*database, compiled)
        })
        .collect()
});

/// Match `token` where it is not glued to identifier characters.
fn token_regex(token: &str) -> Regex {
    Regex::new(&format!(
        r"(?:^|[^A-Za-z0-9_]){}(?:$|[^A-Za-z0-9_])",
        regex::escape(token)
    ))
    .unwrap()
}

fn is_evidence_file(path: &str) -> bool {
    let skipped_ext = extension(path).is_some_and(|ext| DATABASE_SKIP_EXTENSIONS.contains(&ext.as_str()));
    !skipped_ext && !DATABASE_SKIP_FILES.contains(&file_name(path))
}

/// Report each database at most once per file, naming the first token that matched.
pub fn detect_databases(files: &[FileDescriptor]) -> Vec<DatabaseUsage> {
    let mut found = Vec::new();
    for file in files {
        if file.content.is_empty() || !is_evidence_file(&file.path) {
            continue;
        }
        for (database, tokens) in MATCHERS.iter() {
            if let Some((token, _)) = tokens.iter().find(|(_, re)| re.is_match(&file.content)) {
                found.push(DatabaseUsage {
                    kind: database.to_string(),
                    orm: token.to_string(),
                    file: file.path.clone(),
                });
            }
        }
    }
    tracing::debug!("Detected {} database usages", found.len());
    found
}
