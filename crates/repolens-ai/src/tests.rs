//! Unit tests for repolens-ai

use crate::bridge::*;
use crate::providers::{HeuristicSummarizer, create_summarizer};
use repolens_core::{
    Controller, DatabaseUsage, Endpoint, FileEntry, RepositoryAnalysis, RepositoryStats,
};

fn endpoint(path: &str, framework: &str) -> Endpoint {
    Endpoint {
        method: "GET".to_string(),
        path: path.to_string(),
        file: "routes.js".to_string(),
        line: 1,
        framework: framework.to_string(),
    }
}

fn web_request() -> RepositorySummaryRequest {
    let files = vec![
        FileEntry::new("routes.js", 10),
        FileEntry::new("app.js", 10),
        FileEntry::new("db.py", 10),
        FileEntry::new("README.md", 10),
        FileEntry::new("Makefile", 10),
    ];
    let mut analysis = RepositoryAnalysis::new();
    analysis.endpoints = vec![endpoint("/users", "express"), endpoint("/posts", "express")];
    analysis.controllers = vec![Controller {
        name: "routes".to_string(),
        file: "routes.js".to_string(),
    }];
    analysis.databases = vec![DatabaseUsage {
        kind: "PostgreSQL".to_string(),
        orm: "pg".to_string(),
        file: "db.py".to_string(),
    }];
    let stats = RepositoryStats::collect(files.len(), &analysis, 0);
    RepositorySummaryRequest::new("shop", &files, &analysis, stats)
}

#[test]
fn test_request_collects_distinct_stack() {
    let request = web_request();
    assert_eq!(request.name, "shop");
    assert_eq!(request.primary_language.as_deref(), Some("javascript"));
    assert_eq!(request.frameworks, vec!["express"]);
    assert_eq!(request.database_kinds, vec!["PostgreSQL"]);
    assert!(request.orms.is_empty());
}

#[test]
fn test_primary_language_tie_breaks_alphabetically() {
    let files = vec![FileEntry::new("b.py", 1), FileEntry::new("a.js", 1)];
    let analysis = RepositoryAnalysis::new();
    let request = RepositorySummaryRequest::new("x", &files, &analysis, RepositoryStats::default());
    assert_eq!(request.primary_language.as_deref(), Some("javascript"));

    let request = RepositorySummaryRequest::new("x", &[], &analysis, RepositoryStats::default());
    assert_eq!(request.primary_language, None);
}

#[tokio::test]
async fn test_heuristic_summary_for_web_service() {
    let summary = HeuristicSummarizer
        .summarize_repository(&web_request())
        .await
        .unwrap();
    assert_eq!(summary.source, "Heuristic");
    assert!(summary.text.starts_with("## Repository Summary\n\n"));
    assert!(summary.text.contains("- **Architecture**: MVC/Controller-based; Web/API present"));
    assert!(summary.text.contains("- **Stack**: javascript; express; DB: PostgreSQL"));
    assert!(summary.text.contains("- **Risks**: Small/medium size; No data layer detected"));
    assert!(summary.text.contains("\n  - Add tests and CI for critical paths\n"));
    assert!(summary.text.ends_with("- **Scale**: Low complexity; consider modularization and caching."));
}

#[tokio::test]
async fn test_heuristic_summary_for_empty_library() {
    let request = RepositorySummaryRequest {
        stats: RepositoryStats {
            functions: 250,
            models: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    let summary = HeuristicSummarizer.summarize_repository(&request).await.unwrap();
    assert!(summary.text.contains("Function-oriented; Library/CLI leaning"));
    assert!(summary.text.contains("- **Stack**: Mixed; Frameworks: n/a; DB: n/a"));
    assert!(summary.text.contains("Large surface; Data layer present"));
    assert!(summary.text.contains("**Scale**: Moderate complexity"));
    assert_eq!(
        HeuristicSummarizer.analyze_file("a.py", "python", "x = 1").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_fallback_when_chat_has_no_key() {
    let config = SummarizerConfig {
        provider: Provider::Groq,
        ..Default::default()
    };
    let chat = crate::providers::ChatSummarizer::new(&config).unwrap();
    let summary = summarize_or_fallback(&chat, &web_request()).await;
    assert_eq!(summary.source, "Heuristic");
    assert_eq!(analyze_file_or_skip(&chat, "a.js", "javascript", "run()").await, None);
}

#[test]
fn test_summarizer_factory() {
    let heuristic = create_summarizer(&SummarizerConfig {
        provider: Provider::Heuristic,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(heuristic.name(), "heuristic");

    let keyless = create_summarizer(&SummarizerConfig::default()).unwrap();
    assert_eq!(keyless.name(), "heuristic");

    let groq = create_summarizer(&SummarizerConfig {
        api_key: Some("gsk-test".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(groq.name(), "Groq");
}

#[test]
fn test_provider_parsing_and_defaults() {
    assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
    assert_eq!("groq".parse::<Provider>().unwrap(), Provider::Groq);
    assert!("anthropic".parse::<Provider>().is_err());

    let config = SummarizerConfig::default();
    assert_eq!(config.model(), GROQ_DEFAULT_MODEL);
    assert_eq!(config.base_url(), GROQ_BASE_URL);

    let config = SummarizerConfig {
        provider: Provider::OpenAi,
        base_url: Some("http://localhost:8080/v1/".to_string()),
        model: Some("local-model".to_string()),
        ..Default::default()
    };
    assert_eq!(config.base_url(), "http://localhost:8080/v1");
    assert_eq!(config.model(), "local-model");
}

#[test]
fn test_config_deserializes_partial_tables() {
    let config: SummarizerConfig =
        serde_json::from_str(r#"{"provider": "openai", "temperature": 0.3}"#).unwrap();
    assert_eq!(config.provider, Provider::OpenAi);
    assert_eq!(config.temperature, 0.3);
    assert_eq!(config.timeout_secs, 60);
    assert_eq!(config.api_key, None);
}
