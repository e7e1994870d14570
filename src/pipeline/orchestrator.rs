// file: src/pipeline/orchestrator.rs
// description: coordinates search, filtering, indexing and answer synthesis
// reference: sequential single-question run, each stage awaited before the next

use crate::answer::{AnswerSynthesizer, AzureChatClient, ChatModel};
use crate::config::{Config, RetrievalConfig};
use crate::error::Result;
use crate::index::{AzureEmbeddingClient, EmbeddingProvider, SimilarityIndex};
use crate::models::Answer;
use crate::pipeline::progress::{ProgressTracker, RunStats};
use crate::search::{DocumentSearch, RelevanceFilter, SearchClient, flatten_chunks};
use crate::utils::logging::{format_success, format_warning};
use crate::utils::telemetry::{OperationTimer, PerformanceMetrics};
use crate::utils::Validator;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_QUESTION: &str = "what is AI Act";

const SLOW_SEARCH: Duration = Duration::from_secs(10);

pub const NOTHING_TO_ANSWER: &str =
    "No documents scored above the relevance threshold; nothing to answer from.";

#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    /// `None` when no chunk survived filtering and synthesis was skipped
    pub answer: Option<Answer>,
}

pub struct PipelineOrchestrator {
    search: Arc<dyn DocumentSearch>,
    embedder: Arc<dyn EmbeddingProvider>,
    chat: Arc<dyn ChatModel>,
    retrieval: RetrievalConfig,
    colored: bool,
    show_progress: bool,
}

impl PipelineOrchestrator {
    pub fn new(
        search: Arc<dyn DocumentSearch>,
        embedder: Arc<dyn EmbeddingProvider>,
        chat: Arc<dyn ChatModel>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            search,
            embedder,
            chat,
            retrieval,
            colored: false,
            show_progress: false,
        }
    }

    /// Wire the Azure AI Search and Azure OpenAI clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(SearchClient::new(config.search.clone())),
            Arc::new(AzureEmbeddingClient::new(&config.openai)),
            Arc::new(AzureChatClient::new(&config.openai)),
            config.retrieval.clone(),
        )
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn run(&self, question: &str, out: &mut impl Write) -> Result<RunReport> {
        let start_time = Instant::now();
        let mut stats = RunStats::new();

        Validator::validate_question(question)?;
        writeln!(out, "You asked: {}", question)?;

        let timer = OperationTimer::new("search");
        let response = self.search.search(question).await?;
        timer.warn_if_slow(SLOW_SEARCH, "search request");
        timer.finish();

        stats.total_matches = response.count;
        stats.top_results = response.results.len();
        writeln!(
            out,
            "Total documents found: {}. Top documents: {}",
            stats.total_matches, stats.top_results
        )?;

        for answer in &response.answers {
            debug!(
                "Extractive answer [{}]: {}",
                answer.key,
                Validator::truncate_text(&answer.text, 120)
            );
        }

        let filter = RelevanceFilter::from_config(&self.retrieval);
        let documents = filter.apply(&response.results);
        stats.documents_filtered = documents.len();
        writeln!(out, "Filtered Documents: {}", stats.documents_filtered)?;

        let chunks = flatten_chunks(&documents);
        stats.chunks_indexed = chunks.len();

        if chunks.is_empty() {
            warn!("Skipping indexing and answer synthesis: no chunks to index");
            let line = if self.colored {
                format_warning(NOTHING_TO_ANSWER)
            } else {
                NOTHING_TO_ANSWER.to_string()
            };
            writeln!(out, "{}", line)?;

            stats.duration_ms = start_time.elapsed().as_millis() as u64;
            return Ok(RunReport {
                stats,
                answer: None,
            });
        }

        let timer = OperationTimer::new("embedding");
        let progress = if self.show_progress {
            ProgressTracker::with_color(chunks.len(), self.colored)
        } else {
            ProgressTracker::hidden(chunks.len())
        };
        let index = SimilarityIndex::build_with_progress(
            chunks,
            Arc::clone(&self.embedder),
            self.retrieval.distance,
            &progress,
        )
        .await?;
        stats.bytes_embedded = progress.bytes_embedded();
        let metrics = PerformanceMetrics::new("embedding", index.len(), timer.finish());
        debug!("{}", metrics.format());

        let confirmation = "Vector store created. Sending vector to Azure Open AI.";
        if self.colored {
            writeln!(out, "{}", format_success(confirmation))?;
        } else {
            writeln!(out, "{}", confirmation)?;
        }

        let timer = OperationTimer::new("answer synthesis");
        let synthesizer = AnswerSynthesizer::new(Arc::clone(&self.chat), self.retrieval.top_k);
        let answer = synthesizer.answer(&index, question).await?;
        timer.finish();

        stats.context_chunks = answer.context.len();
        write_answer(out, &answer)?;

        stats.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Run complete: {} matches, {} filtered, {} chunks indexed ({} bytes), {} in context ({} ms)",
            stats.total_matches,
            stats.documents_filtered,
            stats.chunks_indexed,
            stats.bytes_embedded,
            stats.context_chunks,
            stats.duration_ms
        );

        Ok(RunReport {
            stats,
            answer: Some(answer),
        })
    }
}

/// Print the answer followed by one ` - <source>` line per cited source.
pub fn write_answer(out: &mut impl Write, answer: &Answer) -> Result<()> {
    writeln!(out, "Answer: {}", answer.answer)?;
    writeln!(out, "Reference(s):")?;
    for source in answer.source_lines() {
        writeln!(out, " - {}", source)?;
    }
    Ok(())
}
