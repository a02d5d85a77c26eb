//! Session statistics tracking for the prediction pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use tracing::info;

/// Metrics collector for one interactive session
pub struct SessionMetrics {
    /// Total predictions served
    pub predictions_served: AtomicU64,
    /// Predictions answered by the mock fallback formula
    pub mock_predictions: AtomicU64,
    /// Requests that failed during transform or predict
    pub failed_predictions: AtomicU64,
    /// Processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Price distribution buckets, $100k wide, last bucket open-ended
    price_buckets: RwLock<[u64; 10]>,
}

impl SessionMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            mock_predictions: AtomicU64::new(0),
            failed_predictions: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            price_buckets: RwLock::new([0; 10]),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, processing_time: Duration, price_usd: f64, mock: bool) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
        if mock {
            self.mock_predictions.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only the most recent entries for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        let bucket = (price_usd / 100_000.0).clamp(0.0, 9.0) as usize;
        if let Ok(mut buckets) = self.price_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a failed prediction request
    pub fn record_failure(&self) {
        self.failed_predictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self.processing_times.read().unwrap();
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get the price distribution
    pub fn get_price_distribution(&self) -> [u64; 10] {
        *self.price_buckets.read().unwrap()
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let mock = self.mock_predictions.load(Ordering::Relaxed);
        let failed = self.failed_predictions.load(Ordering::Relaxed);
        let processing = self.get_processing_stats();
        let distribution = self.get_price_distribution();

        info!("════════ SESSION SUMMARY ════════");
        info!(
            "Predictions served: {} ({} mock), failed: {}",
            served, mock, failed
        );
        info!(
            "Processing time (μs): mean={} p50={} p95={} p99={} max={}",
            processing.mean_us, processing.p50_us, processing.p95_us, processing.p99_us,
            processing.max_us
        );

        let total: u64 = distribution.iter().sum();
        if total > 0 {
            info!("Price distribution:");
            for (i, &count) in distribution.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let pct = (count as f64 / total as f64) * 100.0;
                let upper = if i == 9 {
                    "+".to_string()
                } else {
                    format!("-${}k", (i + 1) * 100)
                };
                info!("  ${}k{}: {} ({:.1}%)", i * 100, upper, count, pct);
            }
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}
