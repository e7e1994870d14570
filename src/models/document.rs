// file: src/models/document.rs
// description: filtered search documents and the chunks derived from them
// reference: internal data structures

use crate::models::search_result::{Caption, SearchResult};
use serde::{Deserialize, Serialize};

/// A search hit that cleared the relevance threshold, trimmed for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredDocument {
    pub chunks: Vec<String>,
    pub captions: Vec<Caption>,
    pub score: f64,
    pub file_name: String,
}

impl FilteredDocument {
    /// Build from a raw hit, keeping at most `max_segments` pages and captions.
    pub fn from_result(result: &SearchResult, max_segments: usize) -> Self {
        Self {
            chunks: result.pages.iter().take(max_segments).cloned().collect(),
            captions: result.captions.iter().take(max_segments).cloned().collect(),
            score: result.score,
            file_name: result.storage_name.clone(),
        }
    }
}

/// Unit of embedding and retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub source: String,
}

impl Chunk {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(pages: usize, captions: usize) -> SearchResult {
        SearchResult {
            storage_path: "path/doc.pdf".to_string(),
            storage_name: "doc.pdf".to_string(),
            score: 2.5,
            pages: (0..pages).map(|i| format!("page {}", i)).collect(),
            captions: (0..captions)
                .map(|i| Caption {
                    text: format!("caption {}", i),
                    highlights: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_from_result_truncates() {
        let doc = FilteredDocument::from_result(&hit(15, 12), 10);

        assert_eq!(doc.chunks.len(), 10);
        assert_eq!(doc.captions.len(), 10);
        assert_eq!(doc.chunks[9], "page 9");
        assert_eq!(doc.file_name, "doc.pdf");
        assert_eq!(doc.score, 2.5);
    }

    #[test]
    fn test_from_result_keeps_short_lists() {
        let doc = FilteredDocument::from_result(&hit(2, 0), 10);
        assert_eq!(doc.chunks, vec!["page 0", "page 1"]);
        assert!(doc.captions.is_empty());
    }
}
