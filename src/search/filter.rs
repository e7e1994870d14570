// file: src/search/filter.rs
// description: relevance filtering of search hits and chunk flattening
// reference: ordered deduplication keyed by storage path

use crate::config::RetrievalConfig;
use crate::models::{Chunk, FilteredDocument, SearchResult};
use indexmap::IndexMap;
use tracing::debug;

/// Filtered documents keyed by storage path, in first-seen order.
pub type FilteredDocuments = IndexMap<String, FilteredDocument>;

#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    threshold: f64,
    max_segments: usize,
}

impl RelevanceFilter {
    pub fn new(threshold: f64, max_segments: usize) -> Self {
        Self {
            threshold,
            max_segments,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.relevance_threshold, config.max_segments)
    }

    pub fn accepts(&self, result: &SearchResult) -> bool {
        result.score > self.threshold
    }

    /// Keep hits scoring strictly above the threshold. A repeated storage path
    /// replaces the earlier entry but keeps its position.
    pub fn apply(&self, results: &[SearchResult]) -> FilteredDocuments {
        let mut documents = IndexMap::new();

        for result in results {
            if !self.accepts(result) {
                debug!(
                    "Dropping {} (score {:.3} <= {})",
                    result.storage_name, result.score, self.threshold
                );
                continue;
            }

            documents.insert(
                result.storage_path.clone(),
                FilteredDocument::from_result(result, self.max_segments),
            );
        }

        documents
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

/// One chunk per retained page, document order then page order.
pub fn flatten_chunks(documents: &FilteredDocuments) -> Vec<Chunk> {
    documents
        .values()
        .flat_map(|doc| {
            doc.chunks
                .iter()
                .map(move |page| Chunk::new(page.clone(), doc.file_name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hit(path: &str, name: &str, score: f64, pages: usize) -> SearchResult {
        SearchResult {
            storage_path: path.to_string(),
            storage_name: name.to_string(),
            score,
            pages: (0..pages).map(|i| format!("{} p{}", name, i)).collect(),
            captions: vec![],
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let filter = RelevanceFilter::default();
        let results = vec![
            hit("a", "a.pdf", 0.8, 1),
            hit("b", "b.pdf", 0.8000001, 1),
            hit("c", "c.pdf", 0.0, 1),
        ];

        let docs = filter.apply(&results);
        assert_eq!(docs.keys().cloned().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let filter = RelevanceFilter::default();
        assert!(filter.apply(&[]).is_empty());
        assert!(filter.apply(&[hit("a", "a.pdf", 0.5, 3)]).is_empty());
        assert!(flatten_chunks(&FilteredDocuments::new()).is_empty());
    }

    #[test]
    fn test_duplicate_path_overwrites_in_place() {
        let filter = RelevanceFilter::default();
        let results = vec![
            hit("a", "first.pdf", 2.0, 1),
            hit("b", "b.pdf", 2.0, 1),
            hit("a", "second.pdf", 3.0, 2),
        ];

        let docs = filter.apply(&results);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(docs["a"].file_name, "second.pdf");
        assert_eq!(docs["a"].score, 3.0);
    }

    #[test]
    fn test_custom_threshold_and_limit() {
        let filter = RelevanceFilter::new(2.0, 3);
        let docs = filter.apply(&[hit("a", "a.pdf", 2.5, 8), hit("b", "b.pdf", 1.5, 8)]);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs["a"].chunks.len(), 3);
    }

    #[test]
    fn test_flatten_order() {
        let filter = RelevanceFilter::default();
        let docs = filter.apply(&[hit("x", "x.pdf", 1.0, 2), hit("y", "y.pdf", 1.0, 1)]);

        let chunks = flatten_chunks(&docs);
        assert_eq!(
            chunks,
            vec![
                Chunk::new("x.pdf p0", "x.pdf"),
                Chunk::new("x.pdf p1", "x.pdf"),
                Chunk::new("y.pdf p0", "y.pdf"),
            ]
        );
    }

    #[test]
    fn test_scenario_counts() {
        let filter = RelevanceFilter::default();
        let docs = filter.apply(&[
            hit("1", "one.pdf", 3.5, 2),
            hit("2", "two.pdf", 0.9, 15),
            hit("3", "three.pdf", 0.5, 1),
        ]);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs["2"].chunks.len(), 10);
        assert_eq!(flatten_chunks(&docs).len(), 12);
    }
}
