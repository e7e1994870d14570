// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for a pipeline run
// reference: uses indicatif for the embedding progress bar and tracks run metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub total_matches: u64,
    pub top_results: usize,
    pub documents_filtered: usize,
    pub chunks_indexed: usize,
    /// Total bytes of chunk text sent for embedding.
    pub bytes_embedded: u64,
    pub context_chunks: usize,
    pub duration_ms: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of returned hits that survived filtering, as a percentage.
    pub fn retention_rate(&self) -> f64 {
        if self.top_results == 0 {
            return 0.0;
        }
        (self.documents_filtered as f64 / self.top_results as f64) * 100.0
    }

    pub fn chunks_per_document(&self) -> f64 {
        if self.documents_filtered == 0 {
            return 0.0;
        }
        self.chunks_indexed as f64 / self.documents_filtered as f64
    }
}

/// Counts chunks as they are embedded and mirrors that on a progress bar.
pub struct ProgressTracker {
    bar: ProgressBar,
    chunks_embedded: AtomicUsize,
    bytes_embedded: AtomicU64,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_chunks: usize, colored: bool) -> Self {
        Self::from_bar(create_progress_bar(total_chunks as u64, colored))
    }

    /// Tracks counts without drawing anything.
    pub fn hidden(total_chunks: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_chunks as u64);
        Self::from_bar(bar)
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            chunks_embedded: AtomicUsize::new(0),
            bytes_embedded: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_embedded(&self, bytes: u64) {
        self.chunks_embedded.fetch_add(1, Ordering::SeqCst);
        self.bytes_embedded.fetch_add(bytes, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn chunks_embedded(&self) -> usize {
        self.chunks_embedded.load(Ordering::SeqCst)
    }

    pub fn bytes_embedded(&self) -> u64 {
        self.bytes_embedded.load(Ordering::SeqCst)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} Embedding chunks [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner} Embedding chunks [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})"
    };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" })),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_calculations() {
        let stats = RunStats {
            total_matches: 120,
            top_results: 10,
            documents_filtered: 4,
            chunks_indexed: 30,
            bytes_embedded: 48_000,
            context_chunks: 4,
            duration_ms: 900,
        };

        assert_eq!(stats.retention_rate(), 40.0);
        assert_eq!(stats.chunks_per_document(), 7.5);
    }

    #[test]
    fn test_run_stats_zero_division() {
        let stats = RunStats::new();
        assert_eq!(stats.retention_rate(), 0.0);
        assert_eq!(stats.chunks_per_document(), 0.0);
    }

    #[test]
    fn test_tracker_counts() {
        let tracker = ProgressTracker::hidden(3);

        tracker.inc_embedded(100);
        tracker.inc_embedded(24);

        assert_eq!(tracker.chunks_embedded(), 2);
        assert_eq!(tracker.bytes_embedded(), 124);
        tracker.finish();
    }
}
