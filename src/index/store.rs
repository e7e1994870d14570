// file: src/index/store.rs
// description: in-memory nearest-neighbour index over embedded chunks
// reference: exhaustive flat index, ranked by vector distance

use crate::config::DistanceMetric;
use crate::error::{PipelineError, Result};
use crate::index::embeddings::EmbeddingProvider;
use crate::models::Chunk;
use crate::pipeline::ProgressTracker;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct IndexedChunk {
    chunk: Chunk,
    vector: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Distance to the query, lower is closer
    pub distance: f32,
}

/// Flat vector index built fresh for each run and never persisted.
pub struct SimilarityIndex {
    entries: Vec<IndexedChunk>,
    dimensions: usize,
    metric: DistanceMetric,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SimilarityIndex {
    pub async fn build(
        chunks: Vec<Chunk>,
        embedder: Arc<dyn EmbeddingProvider>,
        metric: DistanceMetric,
    ) -> Result<Self> {
        let progress = ProgressTracker::hidden(chunks.len());
        Self::build_with_progress(chunks, embedder, metric, &progress).await
    }

    /// Embed every chunk in order, one request per chunk.
    pub async fn build_with_progress(
        chunks: Vec<Chunk>,
        embedder: Arc<dyn EmbeddingProvider>,
        metric: DistanceMetric,
        progress: &ProgressTracker,
    ) -> Result<Self> {
        if chunks.is_empty() {
            return Err(PipelineError::EmptyIndex);
        }

        let mut entries = Vec::with_capacity(chunks.len());
        let mut dimensions = 0;

        for chunk in chunks {
            let vector = embedder.embed(&chunk.content).await?;

            if entries.is_empty() {
                dimensions = vector.len();
            } else if vector.len() != dimensions {
                return Err(PipelineError::Embedding(format!(
                    "Embedding for chunk from {} has dimension {}, expected {}",
                    chunk.source,
                    vector.len(),
                    dimensions
                )));
            }

            progress.inc_embedded(chunk.content.len() as u64);
            entries.push(IndexedChunk { chunk, vector });
        }

        progress.finish();
        info!(
            "Indexed {} chunks ({} dimensions, {:?} distance) in {} ms",
            entries.len(),
            dimensions,
            metric,
            progress.elapsed_ms()
        );

        Ok(Self {
            entries,
            dimensions,
            metric,
            embedder,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The `k` closest chunks to `query`, nearest first. Ties keep index order.
    pub fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimensions {
            return Err(PipelineError::Validation(format!(
                "Query vector has dimension {}, index expects {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                distance: distance(self.metric, &entry.vector, query),
            })
            .collect();

        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        debug!("Nearest-neighbour lookup returned {} chunks", scored.len());
        Ok(scored)
    }

    /// Embed `text` with the index's own provider and look up its neighbours.
    pub async fn retrieve(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query = self.embedder.embed(text).await?;
        self.nearest(&query, k)
    }
}

fn distance(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        DistanceMetric::Euclidean => euclidean_distance(a, b),
        DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
    }
}

fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
