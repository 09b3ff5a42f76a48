//! Range calculation timing.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct Totals {
    count: u64,
    total_ms: f64,
    min_ms: f64,
    max_ms: f64,
    per_model_ms: BTreeMap<String, f64>,
}

/// Point-in-time view of the recorded range calculations.
///
/// The timing statistics are omitted while nothing has been recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub total_range_calculations: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_execution_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_execution_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_execution_time_ms: Option<f64>,
    /// Summed execution time per model
    pub model_performance: BTreeMap<String, f64>,
}

/// Accumulates wall-clock time of range calculations per model.
///
/// Shared across request handlers behind an `Arc`.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    totals: Mutex<Totals>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Totals> {
        // Totals stay consistent even if a holder panicked
        self.totals.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record one range calculation by `model` taking `elapsed_ms`.
    pub fn record(&self, model: &str, elapsed_ms: f64) {
        let mut totals = self.lock();
        if totals.count == 0 {
            totals.min_ms = elapsed_ms;
            totals.max_ms = elapsed_ms;
        } else {
            totals.min_ms = totals.min_ms.min(elapsed_ms);
            totals.max_ms = totals.max_ms.max(elapsed_ms);
        }
        totals.count += 1;
        totals.total_ms += elapsed_ms;
        *totals.per_model_ms.entry(model.to_string()).or_default() += elapsed_ms;
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        let totals = self.lock();
        let recorded = totals.count > 0;
        PerformanceSnapshot {
            total_range_calculations: totals.count,
            average_execution_time_ms: recorded.then(|| totals.total_ms / totals.count as f64),
            min_execution_time_ms: recorded.then_some(totals.min_ms),
            max_execution_time_ms: recorded.then_some(totals.max_ms),
            model_performance: totals.per_model_ms.clone(),
        }
    }

    /// Discard everything recorded so far.
    pub fn reset(&self) {
        *self.lock() = Totals::default();
        tracing::info!("Performance metrics reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_snapshot_omits_timings() {
        let tracker = PerformanceTracker::new();
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.total_range_calculations, 0);
        assert!(snapshot.average_execution_time_ms.is_none());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["totalRangeCalculations"], 0);
        assert!(json.get("averageExecutionTimeMs").is_none());
        assert!(json["modelPerformance"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_record_aggregates() {
        let tracker = PerformanceTracker::new();
        tracker.record("european", 2.0);
        tracker.record("binomial", 10.0);
        tracker.record("european", 6.0);

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.total_range_calculations, 3);
        assert_eq!(snapshot.average_execution_time_ms, Some(6.0));
        assert_eq!(snapshot.min_execution_time_ms, Some(2.0));
        assert_eq!(snapshot.max_execution_time_ms, Some(10.0));
        assert_eq!(snapshot.model_performance["european"], 8.0);
        assert_eq!(snapshot.model_performance["binomial"], 10.0);
    }

    #[test]
    fn test_reset() {
        let tracker = PerformanceTracker::new();
        tracker.record("monte_carlo", 4.0);
        tracker.reset();
        assert_eq!(tracker.snapshot().total_range_calculations, 0);
        assert!(tracker.snapshot().model_performance.is_empty());
    }

    #[test]
    fn test_concurrent_records() {
        let tracker = Arc::new(PerformanceTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        tracker.record(if i % 2 == 0 { "european" } else { "american" }, 1.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.total_range_calculations, 800);
        assert_eq!(snapshot.model_performance["european"], 400.0);
        assert_eq!(snapshot.model_performance["american"], 400.0);
    }
}
