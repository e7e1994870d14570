// file: src/utils/telemetry.rs
// description: stage timing and throughput helpers
// reference: tracing-based operation timing

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Logs how long a named stage took.
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration, message: &str) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: {} took {:.2}s (threshold: {:.2}s)",
                self.operation,
                message,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub operation: String,
    pub count: usize,
    pub duration_ms: u64,
    pub throughput: f64, // items per second
    pub avg_item_time_ms: f64,
}

impl PerformanceMetrics {
    pub fn new(operation: &str, count: usize, duration: Duration) -> Self {
        let duration_ms = duration.as_millis() as u64;
        let duration_secs = duration.as_secs_f64();

        let throughput = if duration_secs > 0.0 {
            count as f64 / duration_secs
        } else {
            0.0
        };

        let avg_item_time_ms = if count > 0 {
            duration_ms as f64 / count as f64
        } else {
            0.0
        };

        Self {
            operation: operation.to_string(),
            count,
            duration_ms,
            throughput,
            avg_item_time_ms,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{}: {} items in {}ms ({:.2} items/sec, {:.2}ms per item)",
            self.operation, self.count, self.duration_ms, self.throughput, self.avg_item_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_metrics() {
        let metrics = PerformanceMetrics::new("embedding", 12, Duration::from_secs(4));
        assert_eq!(metrics.count, 12);
        assert_eq!(metrics.throughput, 3.0);
        assert_eq!(metrics.avg_item_time_ms, 4000.0 / 12.0);
        assert!(metrics.format().starts_with("embedding: 12 items in 4000ms"));
    }

    #[test]
    fn test_performance_metrics_zero_count() {
        let metrics = PerformanceMetrics::new("embedding", 0, Duration::ZERO);
        assert_eq!(metrics.throughput, 0.0);
        assert_eq!(metrics.avg_item_time_ms, 0.0);
    }

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("search");
        std::thread::sleep(Duration::from_millis(10));
        timer.warn_if_slow(Duration::from_secs(60), "search request");
        let elapsed = timer.finish();
        assert!(elapsed >= Duration::from_millis(10));
    }
}
