// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod document;
pub mod search_result;

pub use answer::{Answer, format_sources};
pub use document::{Chunk, FilteredDocument};
pub use search_result::{Caption, SearchResponse, SearchResult, SemanticAnswer};
