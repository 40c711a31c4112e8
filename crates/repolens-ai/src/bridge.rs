//! Summarizer contract shared by every backend

use repolens_core::{FileEntry, FileInsight, Language, RepositoryAnalysis, RepositoryStats};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SummarizerError>;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("no API key configured for {0}")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("could not parse model output: {0}")]
    Parse(String),
}

/// Which backend produces summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Heuristic,
    #[default]
    Groq,
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Heuristic => "heuristic",
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's key.
    pub fn api_key_var(self) -> Option<&'static str> {
        match self {
            Provider::Heuristic => None,
            Provider::Groq => Some("GROQ_API_KEY"),
            Provider::OpenAi => Some("OPENAI_API_KEY"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "heuristic" => Ok(Provider::Heuristic),
            "groq" => Ok(Provider::Groq),
            "openai" => Ok(Provider::OpenAi),
            _ => anyhow::bail!("Unknown summarizer provider: {}", s),
        }
    }
}

/// Summarizer settings; every key is optional in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub provider: Provider,
    pub model: Option<String>,
    pub base_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            base_url: None,
            api_key: None,
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

impl SummarizerConfig {
    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, Provider::OpenAi) => OPENAI_DEFAULT_MODEL,
            (None, _) => GROQ_DEFAULT_MODEL,
        }
    }

    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url.trim_end_matches('/'),
            (None, Provider::OpenAi) => OPENAI_BASE_URL,
            (None, _) => GROQ_BASE_URL,
        }
    }
}

/// Aggregate facts handed to a summarizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummaryRequest {
    pub name: String,
    pub primary_language: Option<String>,
    pub stats: RepositoryStats,
    pub frameworks: Vec<String>,
    pub database_kinds: Vec<String>,
    pub orms: Vec<String>,
}

impl RepositorySummaryRequest {
    pub fn new(
        name: impl Into<String>,
        files: &[FileEntry],
        analysis: &RepositoryAnalysis,
        stats: RepositoryStats,
    ) -> Self {
        Self {
            name: name.into(),
            primary_language: primary_language(files),
            stats,
            frameworks: distinct(analysis.endpoints.iter().map(|e| e.framework.as_str())),
            database_kinds: distinct(analysis.databases.iter().map(|d| d.kind.as_str())),
            orms: distinct(analysis.models.iter().map(|m| m.orm.as_str())),
        }
    }
}

/// Most common known language; ties go to the alphabetically first name.
fn primary_language(files: &[FileEntry]) -> Option<String> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for file in files {
        if file.language != Language::Unknown {
            *counts.entry(file.language.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(name, _)| name.to_string())
}

/// First-seen order, empties dropped.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// A repository summary and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: String,
}

/// Produces repository summaries and, optionally, per-file insight.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize_repository(&self, request: &RepositorySummaryRequest) -> Result<Summary>;

    /// Deep insight for one file; `None` when the backend offers none.
    async fn analyze_file(
        &self,
        path: &str,
        language: &str,
        content: &str,
    ) -> Result<Option<FileInsight>>;
}

/// Summarize, falling back to the offline rules on any failure.
pub async fn summarize_or_fallback(
    summarizer: &dyn Summarizer,
    request: &RepositorySummaryRequest,
) -> Summary {
    match summarizer.summarize_repository(request).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("{} summary failed, using heuristic: {}", summarizer.name(), e);
            crate::providers::heuristic::summarize(request)
        }
    }
}

/// File insight, or `None` when the backend fails.
pub async fn analyze_file_or_skip(
    summarizer: &dyn Summarizer,
    path: &str,
    language: &str,
    content: &str,
) -> Option<FileInsight> {
    match summarizer.analyze_file(path, language, content).await {
        Ok(insight) => insight,
        Err(e) => {
            tracing::warn!("Insight for {} failed: {}", path, e);
            None
        }
    }
}
