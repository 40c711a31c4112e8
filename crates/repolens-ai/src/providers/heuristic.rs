//! Offline, rule-based repository summaries

use crate::bridge::{RepositorySummaryRequest, Result, Summarizer, Summary};
use repolens_core::FileInsight;

pub const HEURISTIC_SOURCE: &str = "Heuristic";

const LARGE_SURFACE_FUNCTIONS: usize = 200;
const MODERATE_SCALE_FUNCTIONS: usize = 100;

/// Summaries computed from counts alone; never offers file insight.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSummarizer;

#[async_trait::async_trait]
impl Summarizer for HeuristicSummarizer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn summarize_repository(&self, request: &RepositorySummaryRequest) -> Result<Summary> {
        Ok(summarize(request))
    }

    async fn analyze_file(
        &self,
        _path: &str,
        _language: &str,
        _content: &str,
    ) -> Result<Option<FileInsight>> {
        Ok(None)
    }
}

fn or_na(values: &[String], na: &str) -> String {
    if values.is_empty() {
        na.to_string()
    } else {
        values.join(", ")
    }
}

pub fn summarize(request: &RepositorySummaryRequest) -> Summary {
    let stats = &request.stats;
    let style = if stats.controllers > 0 {
        "MVC/Controller-based"
    } else {
        "Function-oriented"
    };
    let surface = if stats.apis > 0 {
        "Web/API present"
    } else {
        "Library/CLI leaning"
    };
    let size = if stats.functions > LARGE_SURFACE_FUNCTIONS {
        "Large surface"
    } else {
        "Small/medium size"
    };
    let data = if stats.models == 0 {
        "No data layer detected"
    } else {
        "Data layer present"
    };
    let scale = if stats.functions > MODERATE_SCALE_FUNCTIONS {
        "Moderate"
    } else {
        "Low"
    };

    let text = format!(
        "## Repository Summary\n\
         \n\
         - **Architecture**: {style}; {surface}\n\
         - **Stack**: {}; {}; DB: {}\n\
         - **Risks**: {size}; {data}\n\
         - **Improvements**:\n  \
         - Add tests and CI for critical paths\n  \
         - Enforce lint/types; reduce complexity hotspots\n  \
         - Harden security (authz, validation, secrets)\n  \
         - Observability (logs, metrics, traces)\n\
         - **Scale**: {scale} complexity; consider modularization and caching.",
        request.primary_language.as_deref().unwrap_or("Mixed"),
        or_na(&request.frameworks, "Frameworks: n/a"),
        or_na(&request.database_kinds, "n/a"),
    );

    Summary {
        text,
        source: HEURISTIC_SOURCE.to_string(),
    }
}
