//! Prompt templates for summaries and file insight

use super::bridge::RepositorySummaryRequest;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are concise and precise. No fluff.";
pub const INSIGHT_SYSTEM_PROMPT: &str = "You are a code analysis expert. Output ONLY valid JSON.";

/// Characters of file content sent with an insight request.
pub const MAX_INSIGHT_CHARS: usize = 10_000;

/// Generate the repository summary prompt
pub fn repository_summary_prompt(request: &RepositorySummaryRequest) -> String {
    let stats = &request.stats;
    format!(
        r#"You are a senior software architect.
Summarize this repository concisely. Use tight Markdown with bullets, max ~12 lines.
Prefer high-signal insights over verbosity.

Repo: {}
Main language: {}, Files: {}
Functions: {}, Classes: {}, Components: {}
Endpoints: {}, Models: {}, DBs: {}

Deliver:
- Architecture style
- Tech stack
- Key risks
- Top improvements (3-5)
- Scalability notes"#,
        request.name,
        request.primary_language.as_deref().unwrap_or("Mixed"),
        stats.files,
        stats.functions,
        stats.classes,
        stats.components,
        stats.apis,
        stats.models,
        stats.databases,
    )
}

/// Generate the per-file insight prompt
pub fn file_insight_prompt(path: &str, language: &str, content: &str) -> String {
    format!(
        r#"Analyze this {language} file: "{path}"
Identify:
1. Architectural role (e.g., service, controller, utility, middleware, component)
2. Complex logic or patterns (e.g., singleton, factory, observer, custom hooks)
3. Key dependencies and their purpose
4. Potential issues or technical debt
5. Summary of functionality

Return ONLY a JSON object with these keys:
{{
  "role": string,
  "patterns": string[],
  "purpose": string,
  "technicalDebt": string[],
  "insights": string[]
}}

File content:
```{language}
{}
```"#,
        truncate_chars(content, MAX_INSIGHT_CHARS),
    )
}

/// At most `max` characters of `text`, cut on a character boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

/// The outermost `{ ... }` span of a model reply, if any.
pub fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_extract_json_from_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"role\": \"service\"}\n```";
        assert_eq!(extract_json(reply), Some("{\"role\": \"service\"}"));
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_insight_prompt_truncates_content() {
        let content = "x".repeat(MAX_INSIGHT_CHARS + 500);
        let prompt = file_insight_prompt("src/app.py", "python", &content);
        assert!(prompt.starts_with("Analyze this python file: \"src/app.py\""));
        assert!(prompt.contains(&"x".repeat(MAX_INSIGHT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_INSIGHT_CHARS + 1)));
    }

    #[test]
    fn test_summary_prompt_defaults_language() {
        let request = RepositorySummaryRequest {
            name: "demo".to_string(),
            ..Default::default()
        };
        let prompt = repository_summary_prompt(&request);
        assert!(prompt.contains("Repo: demo"));
        assert!(prompt.contains("Main language: Mixed, Files: 0"));
    }
}
