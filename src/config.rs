// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "SEARCH_RAG";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub key: String,
    #[serde(default = "default_search_api_version")]
    pub api_version: String,
    pub index_name: String,
    pub semantic_configuration: String,
    #[serde(default = "default_top")]
    pub top: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub key: String,
    #[serde(default = "default_openai_api_version")]
    pub api_version: String,
    #[serde(default = "default_embedding_deployment")]
    pub embedding_deployment: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_chat_deployment")]
    pub chat_deployment: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Knobs for the filter and retrieval stages.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Reranker scores must be strictly above this to survive filtering.
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
    /// Cap on pages and captions kept per document.
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub distance: DistanceMetric,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Cosine,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
            max_segments: default_max_segments(),
            top_k: default_top_k(),
            distance: DistanceMetric::default(),
        }
    }
}

fn default_search_api_version() -> String {
    "2023-10-01-Preview".to_string()
}

fn default_top() -> usize {
    10
}

fn default_openai_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_embedding_deployment() -> String {
    "ada002-ddai2".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_chat_deployment() -> String {
    "gpt35t-ddai2".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_relevance_threshold() -> f64 {
    0.8
}

fn default_max_segments() -> usize {
    10
}

fn default_top_k() -> usize {
    4
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists. Otherwise fall back to the default file and
    /// environment, then to the built-in placeholders.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(Some(path));
        }

        warn!(
            "Config file {} not found, using default configuration",
            path.display()
        );
        Ok(Self::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Self::default_config()
        }))
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                endpoint: "https://insert-search-service-name.search.windows.net/".to_string(),
                key: "insert-search-service-key".to_string(),
                api_version: default_search_api_version(),
                index_name: "insert-search-service-index-name".to_string(),
                semantic_configuration: "insert-semantic-configuration-name".to_string(),
                top: default_top(),
            },
            openai: OpenAiConfig {
                endpoint: "https://insert-openai-name.openai.azure.com/".to_string(),
                key: "insert-openai-key".to_string(),
                api_version: default_openai_api_version(),
                embedding_deployment: default_embedding_deployment(),
                embedding_model: default_embedding_model(),
                chat_deployment: default_chat_deployment(),
                temperature: 0.0,
                max_tokens: default_max_tokens(),
            },
            retrieval: RetrievalConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.search.endpoint)
            .map_err(|e| PipelineError::Config(format!("search.endpoint: {}", e)))?;
        Validator::validate_url(&self.openai.endpoint)
            .map_err(|e| PipelineError::Config(format!("openai.endpoint: {}", e)))?;

        if !(0.0..=4.0).contains(&self.retrieval.relevance_threshold) {
            return Err(PipelineError::Config(format!(
                "relevance_threshold must be within 0.0..=4.0, got {}",
                self.retrieval.relevance_threshold
            )));
        }

        if self.retrieval.max_segments == 0 {
            return Err(PipelineError::Config(
                "max_segments must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(PipelineError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if self.search.top == 0 {
            return Err(PipelineError::Config(
                "search.top must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.retrieval.relevance_threshold, 0.8);
        assert_eq!(config.retrieval.max_segments, 10);
        assert_eq!(config.openai.max_tokens, 500);
        assert_eq!(config.openai.temperature, 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = Config::default_config();
        config.retrieval.relevance_threshold = 4.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default_config();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = Config::default_config();
        config.search.endpoint = "search.windows.net".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let config = Config::load_or_default(&missing).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.retrieval.max_segments, 10);
    }

    #[test]
    fn test_load_or_default_reads_existing_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[search]
endpoint = "https://custom.search.windows.net/"
key = "search-key"
index_name = "contracts"
semantic_configuration = "default"

[openai]
endpoint = "https://custom.openai.azure.com/"
key = "openai-key"
"#
        )
        .unwrap();

        let config = Config::load_or_default(file.path()).unwrap();
        assert_eq!(config.search.index_name, "contracts");
    }

    #[test]
    fn test_load_or_default_rejects_invalid_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[search]\nendpoint = \"not a url\"").unwrap();

        assert!(Config::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_from_toml_applies_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[search]
endpoint = "https://example.search.windows.net/"
key = "search-key"
index_name = "docs"
semantic_configuration = "default"

[openai]
endpoint = "https://example.openai.azure.com/"
key = "openai-key"

[retrieval]
distance = "cosine"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.search.api_version, "2023-10-01-Preview");
        assert_eq!(config.search.top, 10);
        assert_eq!(config.openai.chat_deployment, "gpt35t-ddai2");
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.retrieval.distance, DistanceMetric::Cosine);
    }
}
