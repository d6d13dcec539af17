use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::response::{Response, StatusReport};

/// Point-in-time copy of the adapter's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub successes: u64,
    pub failures: u64,
    pub total_ms: u64,
}

impl Statistics {
    pub fn total(&self) -> u64 {
        self.successes + self.failures
    }

    /// Mean inference time over successful requests only; `0` before the first success.
    pub fn average_ms(&self) -> f64 {
        if self.successes == 0 {
            0.0
        } else {
            self.total_ms as f64 / self.successes as f64
        }
    }
}

impl From<Statistics> for StatusReport {
    fn from(stats: Statistics) -> Self {
        StatusReport {
            successful_inferences: stats.successes,
            failed_inferences: stats.failures,
            num_inferences: stats.total(),
            average_inference_ms: stats.average_ms(),
        }
    }
}

/// Process-lifetime outcome counters, safe to share between worker threads.
#[derive(Debug, Default)]
pub struct StatisticsTracker {
    inner: Mutex<Statistics>,
}

impl StatisticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, inference_ms: u64) {
        let mut stats = self.lock();
        stats.successes += 1;
        stats.total_ms += inference_ms;
    }

    pub fn record_failure(&self) {
        self.lock().failures += 1;
    }

    pub fn record(&self, response: &Response) {
        match response {
            Response::Success { inference_ms, .. } => self.record_success(*inference_ms),
            Response::Failure { .. } => self.record_failure(),
        }
    }

    pub fn snapshot(&self) -> Statistics {
        *self.lock()
    }

    // The guarded value is plain counters, so a poisoned lock still holds a consistent state.
    fn lock(&self) -> MutexGuard<'_, Statistics> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_empty() {
        let tracker = StatisticsTracker::new();
        assert_eq!(tracker.snapshot(), Statistics::default());
        assert_eq!(tracker.snapshot().average_ms(), 0.0);
    }

    #[test]
    fn test_failures_do_not_affect_latency() {
        let tracker = StatisticsTracker::new();
        tracker.record_success(30);
        tracker.record_failure();
        tracker.record_success(10);

        let stats = tracker.snapshot();
        assert_eq!(stats.successes, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.total_ms, 40);
        assert_eq!(stats.total(), 3);
        assert!((stats.average_ms() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_only_failures_average_is_zero() {
        let tracker = StatisticsTracker::new();
        tracker.record_failure();
        tracker.record_failure();
        assert_eq!(tracker.snapshot().average_ms(), 0.0);
    }

    #[test]
    fn test_record_dispatches_on_outcome() {
        let tracker = StatisticsTracker::new();
        tracker.record(&Response::success(String::new(), 9, 7));
        tracker.record(&Response::failure("nope"));

        let stats = tracker.snapshot();
        assert_eq!((stats.successes, stats.failures, stats.total_ms), (1, 1, 7));
    }

    #[test]
    fn test_status_report_conversion() {
        let report = StatusReport::from(Statistics {
            successes: 4,
            failures: 2,
            total_ms: 10,
        });
        assert_eq!(report.num_inferences, 6);
        assert!((report.average_inference_ms - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let tracker = Arc::new(StatisticsTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for _ in 0..250 {
                        if i % 2 == 0 {
                            tracker.record_success(2);
                        } else {
                            tracker.record_failure();
                        }
                        let stats = tracker.snapshot();
                        assert_eq!(stats.total_ms, stats.successes * 2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = tracker.snapshot();
        assert_eq!(stats.successes, 1000);
        assert_eq!(stats.failures, 1000);
        assert_eq!(stats.total_ms, 2000);
    }
}
