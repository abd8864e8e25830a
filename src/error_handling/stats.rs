//! Resolution outcome statistics.
//!
//! Counts classification, parse and merge outcomes for one domain's run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::OutcomeType;

/// Outcome tracker for a resolve run.
///
/// Every [`OutcomeType`] is initialized to zero on creation, so lookups never miss.
/// Counters are atomic so a shared reference is enough to record into it.
#[derive(Debug)]
pub struct ResolveStats {
    outcomes: HashMap<OutcomeType, AtomicUsize>,
}

impl Default for ResolveStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveStats {
    /// Creates a tracker with every outcome at zero.
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in OutcomeType::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }
        ResolveStats { outcomes }
    }

    /// Counts one occurrence of `outcome`.
    pub fn increment(&self, outcome: OutcomeType) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map",
                outcome
            );
        }
    }

    /// Current count for `outcome`.
    pub fn get(&self, outcome: OutcomeType) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Adds every counter of `other` into `self`.
    pub fn absorb(&self, other: &ResolveStats) {
        for outcome in OutcomeType::iter() {
            let n = other.get(outcome);
            if n > 0 {
                if let Some(counter) = self.outcomes.get(&outcome) {
                    counter.fetch_add(n, Ordering::Relaxed);
                }
            }
        }
    }

    /// Number of hostnames that received a classification.
    pub fn total_classified(&self) -> usize {
        self.get(OutcomeType::Ok) + self.get(OutcomeType::NoAnswer) + self.get(OutcomeType::NoARecord)
    }

    /// Logs every non-zero counter at debug level.
    pub fn log_summary(&self, domain: &str) {
        for outcome in OutcomeType::iter() {
            let n = self.get(outcome);
            if n > 0 {
                log::debug!("{domain}: {outcome}: {n}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = ResolveStats::new();
        for outcome in OutcomeType::iter() {
            assert_eq!(stats.get(outcome), 0);
        }
        assert_eq!(stats.total_classified(), 0);
    }

    #[test]
    fn test_stats_increment_and_totals() {
        let stats = ResolveStats::new();
        stats.increment(OutcomeType::Ok);
        stats.increment(OutcomeType::Ok);
        stats.increment(OutcomeType::NoARecord);
        stats.increment(OutcomeType::MalformedLine);
        assert_eq!(stats.get(OutcomeType::Ok), 2);
        assert_eq!(stats.total_classified(), 3);
    }

    #[test]
    fn test_stats_absorb() {
        let a = ResolveStats::new();
        let b = ResolveStats::new();
        a.increment(OutcomeType::Dropped);
        b.increment(OutcomeType::Dropped);
        b.increment(OutcomeType::SkippedStatus);
        a.absorb(&b);
        assert_eq!(a.get(OutcomeType::Dropped), 2);
        assert_eq!(a.get(OutcomeType::SkippedStatus), 1);
    }
}
