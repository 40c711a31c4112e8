//! Markdown digest of a repository analysis

use repolens_core::{FileEntry, RepositoryAnalysis};
use std::fmt::Write;

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn line_suffix(line: Option<u32>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

/// Distinct non-empty values in first-seen order, joined, or `Not detected`.
fn distinct_or_none<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    if seen.is_empty() {
        "Not detected".to_string()
    } else {
        seen.join(", ")
    }
}

/// Full Markdown report: files by language, symbols, endpoints, data layer, overview.
pub fn markdown_digest(name: &str, files: &[FileEntry], analysis: &RepositoryAnalysis) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {name} - Code Analysis Digest\n");

    let total_bytes: u64 = files.iter().map(|f| f.size).sum();
    md.push_str("## Repository Information\n");
    let _ = writeln!(md, "- **Files**: {}", files.len());
    let _ = writeln!(md, "- **Size**: {total_bytes} bytes\n");

    md.push_str("## File Structure\n");
    let mut by_language: Vec<(&str, Vec<&FileEntry>)> = Vec::new();
    for file in files {
        let language = file.language.as_str();
        match by_language.iter_mut().find(|(l, _)| *l == language) {
            Some((_, group)) => group.push(file),
            None => by_language.push((language, vec![file])),
        }
    }
    for (language, group) in &by_language {
        let _ = writeln!(md, "\n### {} Files ({})", capitalize(language), group.len());
        for file in group {
            let _ = writeln!(md, "- `{}` ({} bytes)", file.path, file.size);
        }
    }

    let _ = writeln!(md, "\n## Functions ({})", analysis.functions.len());
    for func in &analysis.functions {
        let marker = if func.is_async { " (async)" } else { "" };
        let _ = writeln!(
            md,
            "- `{}` in `{}`{}{}",
            func.name,
            func.file,
            line_suffix(func.line),
            marker
        );
    }

    let _ = writeln!(md, "\n## Classes ({})", analysis.classes.len());
    for class in &analysis.classes {
        let _ = writeln!(md, "- `{}` in `{}`{}", class.name, class.file, line_suffix(class.line));
    }

    let _ = writeln!(md, "\n## Components ({})", analysis.components.len());
    for component in &analysis.components {
        let _ = writeln!(md, "- `{}` in `{}`", component.name, component.file);
    }

    let _ = writeln!(md, "\n## API Endpoints ({})", analysis.endpoints.len());
    for ep in &analysis.endpoints {
        let _ = writeln!(
            md,
            "- **{}** `{}` ({}) in `{}`",
            ep.method, ep.path, ep.framework, ep.file
        );
    }

    let _ = writeln!(md, "\n## Data Models ({})", analysis.models.len());
    for model in &analysis.models {
        let _ = writeln!(md, "- `{}` ({}) in `{}`", model.name, model.orm, model.file);
    }

    let _ = writeln!(md, "\n## Databases ({})", analysis.databases.len());
    for db in &analysis.databases {
        let _ = writeln!(md, "- **{}** using {} (found in `{}`)", db.kind, db.orm, db.file);
    }

    let kind = if analysis.endpoints.is_empty() {
        "library/utility"
    } else {
        "web application"
    };
    let frontend = if analysis.components.is_empty() {
        "No frontend components detected".to_string()
    } else {
        format!("{} UI components detected", analysis.components.len())
    };
    let pattern = if analysis.controllers.is_empty() {
        "Function-based"
    } else {
        "MVC/Controller-based"
    };
    md.push_str("\n## Architecture Overview\n\n");
    let _ = writeln!(md, "This repository appears to be a {kind}.\n");
    let _ = writeln!(md, "- **Frontend**: {frontend}");
    let _ = writeln!(
        md,
        "- **Backend**: {} functions and {} classes",
        analysis.functions.len(),
        analysis.classes.len()
    );
    let _ = writeln!(md, "- **API Layer**: {} endpoints", analysis.endpoints.len());
    let _ = writeln!(
        md,
        "- **Data Layer**: {} models and {} database connections",
        analysis.models.len(),
        analysis.databases.len()
    );
    let _ = writeln!(md, "- **Architecture Pattern**: {pattern}");

    md.push_str("\n## Key Technologies\n\n");
    let _ = writeln!(
        md,
        "- **Frameworks**: {}",
        distinct_or_none(analysis.endpoints.iter().map(|e| e.framework.as_str()))
    );
    let _ = writeln!(
        md,
        "- **Databases**: {}",
        distinct_or_none(analysis.databases.iter().map(|d| d.kind.as_str()))
    );
    let _ = writeln!(
        md,
        "- **ORMs**: {}",
        distinct_or_none(analysis.models.iter().map(|m| m.orm.as_str()))
    );
    md
}
