// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod answer;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod utils;

pub use answer::{AnswerSynthesizer, AzureChatClient, ChatMessage, ChatModel, PromptTemplate};
pub use config::{Config, DistanceMetric, OpenAiConfig, RetrievalConfig, SearchConfig};
pub use error::{PipelineError, Result};
pub use index::{AzureEmbeddingClient, EmbeddingProvider, ScoredChunk, SimilarityIndex};
pub use models::{Answer, Chunk, FilteredDocument, SearchResponse, SearchResult, format_sources};
pub use pipeline::{DEFAULT_QUESTION, PipelineOrchestrator, ProgressTracker, RunReport, RunStats};
pub use search::{DocumentSearch, FilteredDocuments, RelevanceFilter, SearchClient, flatten_chunks};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _orchestrator = PipelineOrchestrator::from_config(&config);
        let _filter = RelevanceFilter::from_config(&config.retrieval);
    }
}
