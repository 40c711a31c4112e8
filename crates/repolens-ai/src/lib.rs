//! Repository summaries for Repolens
//!
//! This crate turns an aggregated analysis into a short architecture
//! summary, either with offline rules or through an OpenAI-compatible
//! chat completion API, and optionally asks the model for per-file
//! insight.

pub mod bridge;
pub mod prompt;
pub mod providers;

#[cfg(test)]
pub mod tests;

pub use bridge::*;
pub use providers::{ChatSummarizer, HeuristicSummarizer, create_summarizer};
