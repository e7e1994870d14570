// file: src/index/embeddings.rs
// description: Azure OpenAI integration for text embeddings
// reference: https://learn.microsoft.com/azure/ai-services/openai/reference#embeddings

use crate::config::OpenAiConfig;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Turns a piece of text into a fixed-dimension vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[derive(Debug, Serialize)]
struct AzureEmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embeds one text per request against a single Azure OpenAI deployment.
pub struct AzureEmbeddingClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
    model: String,
}

impl AzureEmbeddingClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.key.clone(),
            api_version: config.api_version.clone(),
            deployment: config.embedding_deployment.clone(),
            model: config.embedding_model.clone(),
        }
    }

    pub fn embeddings_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings",
            self.endpoint, self.deployment
        )
    }
}

#[async_trait]
impl EmbeddingProvider for AzureEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = AzureEmbeddingRequest {
            input: text,
            model: &self.model,
        };

        debug!(
            "Requesting embedding from deployment {} for {} chars",
            self.deployment,
            text.len()
        );

        let response = self
            .client
            .post(self.embeddings_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::Embedding(format!("Failed to send embedding request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Embedding(format!(
                "Embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let embedding_response: AzureEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::decode("embedding response", e))?;

        match embedding_response.data.into_iter().next() {
            Some(embedding_data) => {
                debug!(
                    "Received embedding of dimension {}",
                    embedding_data.embedding.len()
                );
                Ok(embedding_data.embedding)
            }
            None => Err(PipelineError::Embedding(
                "No embedding data returned".to_string(),
            )),
        }
    }
}
