// file: src/models/search_result.rs
// description: Wire model for Azure AI Search semantic query responses
// reference: https://learn.microsoft.com/rest/api/searchservice/documents/search-get

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Decoded body of a `GET /indexes/{index}/docs` semantic query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matches, present because the query asks for `$count=true`
    #[serde(rename = "@odata.count")]
    pub count: u64,

    /// Extractive answers produced by the semantic ranker
    #[serde(rename = "@search.answers", default)]
    pub answers: Vec<SemanticAnswer>,

    /// Ranked hits, at most `$top` of them
    #[serde(rename = "value")]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Decode a response body, turning missing or mistyped fields into a typed error
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| PipelineError::decode("search response", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Blob storage path, unique per indexed document
    #[serde(rename = "metadata_storage_path")]
    pub storage_path: String,

    /// Display file name
    #[serde(rename = "metadata_storage_name")]
    pub storage_name: String,

    /// Semantic reranker score in 0.0..=4.0, higher is a stronger match
    #[serde(rename = "@search.rerankerScore")]
    pub score: f64,

    /// Text segments of the document in order
    pub pages: Vec<String>,

    #[serde(rename = "@search.captions")]
    pub captions: Vec<Caption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    #[serde(default)]
    pub highlights: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAnswer {
    pub key: String,
    pub text: String,
    #[serde(default)]
    pub highlights: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}
