//! Summarizer backends

pub mod chat;
pub mod heuristic;

pub use chat::ChatSummarizer;
pub use heuristic::HeuristicSummarizer;

use super::bridge::{Provider, Summarizer, SummarizerConfig};
use anyhow::{Context, Result};

/// Factory function to create the configured summarizer
///
/// Chat providers without an API key fall back to the heuristic backend.
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    match config.provider {
        Provider::Heuristic => Ok(Box::new(HeuristicSummarizer)),
        Provider::Groq | Provider::OpenAi => {
            if config.api_key.as_deref().is_none_or(str::is_empty) {
                tracing::info!(
                    "No API key for {}, using heuristic summaries",
                    config.provider.as_str()
                );
                return Ok(Box::new(HeuristicSummarizer));
            }
            let chat = ChatSummarizer::new(config)
                .with_context(|| format!("Failed to build {} client", config.provider.as_str()))?;
            Ok(Box::new(chat))
        }
    }
}
