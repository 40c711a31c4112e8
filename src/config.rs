//! Layered configuration: defaults, then a config file, then the environment

use repolens_ai::{Provider, SummarizerConfig};
use repolens_indexer::IndexerConfig;
use repolens_render::DisplayLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file names looked up under the repository root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["repolens.toml", "repolens.yaml", "repolens.yml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub indexer: IndexerConfig,
    pub display: DisplayLimits,
    pub summarizer: SummarizerConfig,
}

impl AppConfig {
    /// Load config for `root`. An explicit path wins over files found under the root.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => CONFIG_FILE_NAMES
                .iter()
                .map(|name| root.join(name))
                .find(|candidate| candidate.is_file()),
        };

        let mut config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => AppConfig::default(),
        };

        if dotenvy::from_path(root.join(".env")).is_ok() {
            tracing::debug!("Loaded environment from {}", root.join(".env").display());
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&text)?),
            _ => Ok(toml::from_str(&text)?),
        }
    }

    /// Fill summarizer settings from environment variables.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let summarizer = &mut self.summarizer;
        if let Some(provider) = var("REPOLENS_PROVIDER") {
            match provider.parse::<Provider>() {
                Ok(provider) => summarizer.provider = provider,
                Err(e) => tracing::warn!("Ignoring REPOLENS_PROVIDER: {}", e),
            }
        }
        if let Some(model) = var("REPOLENS_MODEL").filter(|m| !m.is_empty()) {
            summarizer.model = Some(model);
        }
        if summarizer.api_key.is_none() {
            summarizer.api_key = summarizer
                .provider
                .api_key_var()
                .and_then(&var)
                .filter(|k| !k.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("repolens.toml"),
            "[indexer]\nconcurrency = 4\nexclude = [\"**/*.min.js\"]\n\n[display]\ntree_files = 50\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&dir.path().join("repolens.toml")).unwrap();
        assert_eq!(config.indexer.concurrency, 4);
        assert_eq!(config.indexer.exclude, vec!["**/*.min.js"]);
        assert_eq!(config.indexer.max_file_bytes, 1024 * 1024);
        assert_eq!(config.display.tree_files, 50);
        assert_eq!(config.display.components, 20);
    }

    #[test]
    fn test_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repolens.yml");
        std::fs::write(&path, "summarizer:\n  provider: openai\n  temperature: 0.5\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.summarizer.provider, Provider::OpenAi);
        assert_eq!(config.summarizer.temperature, 0.5);
        assert_eq!(config.indexer, IndexerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repolens.toml");
        std::fs::write(&path, "[indexer\nconcurrency = 4").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Toml(_))));
        assert!(matches!(
            AppConfig::from_file(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_env_fills_summarizer() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("GROQ_API_KEY", "gsk-1"),
            ("OPENAI_API_KEY", "sk-2"),
            ("REPOLENS_MODEL", "llama-3.1-8b-instant"),
        ]));
        assert_eq!(config.summarizer.api_key.as_deref(), Some("gsk-1"));
        assert_eq!(config.summarizer.model.as_deref(), Some("llama-3.1-8b-instant"));

        let mut config = AppConfig::default();
        config.apply_env(env(&[("REPOLENS_PROVIDER", "openai"), ("OPENAI_API_KEY", "sk-2")]));
        assert_eq!(config.summarizer.provider, Provider::OpenAi);
        assert_eq!(config.summarizer.api_key.as_deref(), Some("sk-2"));
    }

    #[test]
    fn test_file_key_is_not_replaced_by_env() {
        let mut config = AppConfig::default();
        config.summarizer.api_key = Some("from-file".to_string());
        config.apply_env(env(&[("GROQ_API_KEY", "from-env"), ("REPOLENS_PROVIDER", "bogus")]));
        assert_eq!(config.summarizer.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.summarizer.provider, Provider::Groq);
    }

    #[test]
    fn test_load_finds_config_under_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("repolens.yaml"), "indexer:\n  deep_analysis: true\n").unwrap();
        let config = AppConfig::load(dir.path(), None).unwrap();
        assert!(config.indexer.deep_analysis);
    }
}
