// file: src/search/mod.rs
// description: search stage module exports
// reference: internal module structure

pub mod client;
pub mod filter;

pub use client::{DocumentSearch, SearchClient};
pub use filter::{FilteredDocuments, RelevanceFilter, flatten_chunks};
