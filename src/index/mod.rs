// file: src/index/mod.rs
// description: embedding and similarity index module exports
// reference: internal module structure

pub mod embeddings;
pub mod store;

pub use embeddings::{AzureEmbeddingClient, EmbeddingProvider};
pub use store::{ScoredChunk, SimilarityIndex};
