// file: src/search/client.rs
// description: Azure AI Search client issuing semantic document queries
// reference: https://learn.microsoft.com/rest/api/searchservice/documents/search-get

use crate::config::SearchConfig;
use crate::error::{PipelineError, Result};
use crate::models::SearchResponse;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

/// Anything that can answer a semantic query with ranked documents.
#[async_trait]
pub trait DocumentSearch: Send + Sync {
    async fn search(&self, question: &str) -> Result<SearchResponse>;
}

pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn docs_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs",
            self.config.endpoint.trim_end_matches('/'),
            self.config.index_name
        )
    }

    pub fn query_params(&self, question: &str) -> Vec<(&'static str, String)> {
        vec![
            ("api-version", self.config.api_version.clone()),
            ("search", question.to_string()),
            ("select", "*".to_string()),
            ("$top", self.config.top.to_string()),
            ("queryLanguage", "en-us".to_string()),
            ("queryType", "semantic".to_string()),
            (
                "semanticConfiguration",
                self.config.semantic_configuration.clone(),
            ),
            ("$count", "true".to_string()),
            ("speller", "lexicon".to_string()),
            ("answers", "extractive|count-3".to_string()),
            ("captions", "extractive|highlight-false".to_string()),
        ]
    }
}

#[async_trait]
impl DocumentSearch for SearchClient {
    async fn search(&self, question: &str) -> Result<SearchResponse> {
        let url = self.docs_url();
        info!("Querying index {} for: {}", self.config.index_name, question);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("api-key", &self.config.key)
            .query(&self.query_params(question))
            .send()
            .await
            .map_err(|e| PipelineError::Search(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Search(format!(
                "Search service returned status {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Search(format!("Failed to read response body: {}", e)))?;

        let decoded = SearchResponse::from_json(&body)?;
        debug!(
            "Search returned {} of {} matches, {} extractive answers",
            decoded.results.len(),
            decoded.count,
            decoded.answers.len()
        );

        Ok(decoded)
    }
}
