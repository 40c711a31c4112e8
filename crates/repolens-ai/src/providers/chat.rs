//! OpenAI-compatible chat completion backend (Groq, OpenAI)

use crate::bridge::{
    RepositorySummaryRequest, Result, Summarizer, SummarizerConfig, SummarizerError, Summary,
};
use crate::prompt::{
    INSIGHT_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT, extract_json, file_insight_prompt,
    repository_summary_prompt,
};
use repolens_core::FileInsight;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct ChatSummarizer {
    client: reqwest::Client,
    label: &'static str,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
}

impl ChatSummarizer {
    pub fn new(config: &SummarizerConfig) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            label: provider_label(config),
            api_key: config.api_key.clone(),
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SummarizerError::MissingApiKey(self.label.to_string()))?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

fn provider_label(config: &SummarizerConfig) -> &'static str {
    match config.provider {
        crate::bridge::Provider::OpenAi => "OpenAI",
        _ => "Groq",
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if it has any.
    fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Insight fields as the model returns them; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InsightJson {
    role: String,
    patterns: Vec<String>,
    purpose: String,
    technical_debt: Vec<String>,
    insights: Vec<String>,
}

/// Parse a model reply into a file insight.
pub fn parse_insight(path: &str, reply: &str) -> Result<FileInsight> {
    let json = extract_json(reply)
        .ok_or_else(|| SummarizerError::Parse("no JSON object in reply".to_string()))?;
    let raw: InsightJson =
        serde_json::from_str(json).map_err(|e| SummarizerError::Parse(e.to_string()))?;
    Ok(FileInsight {
        file: path.to_string(),
        role: raw.role,
        patterns: raw.patterns,
        purpose: raw.purpose,
        technical_debt: raw.technical_debt,
        insights: raw.insights,
    })
}

#[async_trait::async_trait]
impl Summarizer for ChatSummarizer {
    fn name(&self) -> &str {
        self.label
    }

    async fn summarize_repository(&self, request: &RepositorySummaryRequest) -> Result<Summary> {
        let prompt = repository_summary_prompt(request);
        let chat = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SUMMARY_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: None,
        };

        let response = self.complete(&chat).await?;
        let text = response
            .first_content()
            .ok_or(SummarizerError::EmptyResponse)?
            .to_string();
        let model = response.model.as_deref().unwrap_or(&self.model);
        tracing::debug!("{} summary received from {}", self.label, model);

        Ok(Summary {
            text,
            source: format!("{}:{}", self.label, model),
        })
    }

    async fn analyze_file(
        &self,
        path: &str,
        language: &str,
        content: &str,
    ) -> Result<Option<FileInsight>> {
        let prompt = file_insight_prompt(path, language, content);
        let chat = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: INSIGHT_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self.complete(&chat).await?;
        let reply = response
            .first_content()
            .ok_or(SummarizerError::EmptyResponse)?;
        parse_insight(path, reply).map(Some)
    }
}
