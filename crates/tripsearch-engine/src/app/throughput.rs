//! Live attempts-per-second estimate shared by all workers
//!
//! Consistency: every counter is an `AtomicU64`. Attempts are added with
//! relaxed ordering. When the wall-clock second changes, exactly one thread
//! (the one that wins the compare-exchange on `last_second`) folds the tally
//! into the moving average. Reads are approximate (an attempt racing with a
//! fold may land in either second) but never torn.

use crate::domain::rate::{CondensedRate, condense_rate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Exponentially decayed attempt rate
#[derive(Debug, Default)]
pub struct RateTracker {
    tally: AtomicU64,
    average: AtomicU64,
    last_second: AtomicU64,
    total: AtomicU64,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one attempt at the current wall-clock second
    #[inline]
    pub fn record_attempt(&self) {
        self.record_attempt_at(unix_seconds());
    }

    /// Count one attempt at `second` (seconds since the Unix epoch)
    pub fn record_attempt_at(&self, second: u64) {
        self.total.fetch_add(1, Ordering::Relaxed);

        let last = self.last_second.load(Ordering::Relaxed);
        if last != second
            && self
                .last_second
                .compare_exchange(last, second, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
        {
            let tally = self.tally.swap(1, Ordering::AcqRel);
            let average = self.average.load(Ordering::Relaxed);
            // average/2 + tally/2, rounded down once
            self.average.store((average + tally) / 2, Ordering::Relaxed);
        } else {
            self.tally.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Smoothed rate, or the raw tally before the first fold
    pub fn current_rate(&self) -> u64 {
        match self.average.load(Ordering::Relaxed) {
            0 => self.tally.load(Ordering::Relaxed),
            average => average,
        }
    }

    pub fn condensed_rate(&self) -> CondensedRate {
        condense_rate(self.current_rate())
    }

    /// Attempts recorded since creation
    pub fn total_attempts(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_startup_reports_tally() {
        let tracker = RateTracker::new();
        assert_eq!(tracker.current_rate(), 0);

        // First call folds the empty pre-start tally
        for _ in 0..10 {
            tracker.record_attempt_at(100);
        }
        assert_eq!(tracker.current_rate(), 10);
    }

    #[test]
    fn test_fold_after_second_boundary() {
        let tracker = RateTracker::new();
        for _ in 0..1000 {
            tracker.record_attempt_at(100);
        }
        tracker.record_attempt_at(101);

        // 0/2 + 1000/2
        assert_eq!(tracker.current_rate(), 500);
        assert_eq!(tracker.total_attempts(), 1001);
    }

    #[test]
    fn test_average_decays() {
        let tracker = RateTracker::new();
        for second in 100..110 {
            for _ in 0..1000 {
                tracker.record_attempt_at(second);
            }
        }
        tracker.record_attempt_at(110);

        // Converges towards 1000 from below
        let rate = tracker.current_rate();
        assert!((990..=1000).contains(&rate), "rate = {}", rate);
        assert_eq!(tracker.condensed_rate().prefix, None);
    }

    #[test]
    fn test_steady_rate_condenses_to_kilo() {
        let tracker = RateTracker::new();
        for second in 100..130 {
            for _ in 0..2000 {
                tracker.record_attempt_at(second);
            }
        }
        tracker.record_attempt_at(130);

        let condensed = tracker.condensed_rate();
        assert_eq!(condensed.prefix, Some('k'));
        assert!(condensed.value > 1.9 && condensed.value <= 2.0);
    }

    #[test]
    fn test_concurrent_attempts_are_counted() {
        let tracker = Arc::new(RateTracker::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for i in 0..10_000u64 {
                        tracker.record_attempt_at(1_000 + i / 2_500);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.total_attempts(), 40_000);
        assert!(tracker.current_rate() <= 40_000);
    }
}
