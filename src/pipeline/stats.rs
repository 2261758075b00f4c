//! Pipeline-wide statistics helpers.
//!
//! `PipelineStats` tracks how many invocations ran and how they ended;
//! `StatsManager` coordinates thread-safe updates from concurrent requests.

use std::fmt;
use std::sync::Mutex;

/// Statistics for the triage pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    /// The total number of invocations.
    pub total_processed: usize,
    /// The number of invocations that produced a diagnosis.
    pub successful_predictions: usize,
    /// The number of invocations that ended in an error.
    pub failed_predictions: usize,
}

impl PipelineStats {
    /// Returns the success rate as a percentage (0.0 to 100.0).
    pub fn success_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            (self.successful_predictions as f64 / self.total_processed as f64) * 100.0
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} ok, {} failed ({:.1}% success)",
            self.total_processed,
            self.successful_predictions,
            self.failed_predictions,
            self.success_rate()
        )
    }
}

/// Thread-safe accumulator for [`PipelineStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsManager {
    inner: Mutex<PipelineStats>,
}

impl StatsManager {
    /// Records the outcome of one invocation.
    pub fn record(&self, success: bool) {
        let mut stats = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        stats.total_processed += 1;
        if success {
            stats.successful_predictions += 1;
        } else {
            stats.failed_predictions += 1;
        }
    }

    /// Returns a copy of the current statistics.
    pub fn snapshot(&self) -> PipelineStats {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let manager = StatsManager::default();
        manager.record(true);
        manager.record(true);
        manager.record(false);

        let stats = manager.snapshot();
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.successful_predictions, 2);
        assert_eq!(stats.failed_predictions, 1);
        assert!((stats.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_stats_report_zero_rate() {
        let stats = PipelineStats::default();
        assert_eq!(stats.success_rate(), 0.0);
    }
}
