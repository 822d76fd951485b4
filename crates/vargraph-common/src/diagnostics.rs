//! Batch-level diagnostics: data-quality counters and once-per-message
//! log deduplication.

use std::collections::HashSet;

use crate::error::Tally;

/// End-of-run data-quality counters, printed by the batch driver.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchCounts {
    pub unresolved: usize,
    pub manual_intervention: usize,
    pub nonsensical: usize,
    pub parsed: usize,
}

impl BatchCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment exactly one bucket for a record-local failure.
    pub fn record(&mut self, tally: Tally) {
        match tally {
            Tally::Unresolved => self.unresolved += 1,
            Tally::ManualIntervention => self.manual_intervention += 1,
            Tally::Nonsensical => self.nonsensical += 1,
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            unresolved = self.unresolved,
            manual_intervention_required = self.manual_intervention,
            nonsensical = self.nonsensical,
            parsed = self.parsed,
            "batch complete"
        );
    }
}

/// Suppresses repeat log lines for identical failure messages. Every
/// occurrence still increments its counter; only the logging is deduplicated.
#[derive(Debug, Default)]
pub struct MessageDedup {
    seen: HashSet<String>,
}

impl MessageDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time a message is seen.
    pub fn first_occurrence(&mut self, message: &str) -> bool {
        self.seen.insert(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_record_one_bucket() {
        let mut counts = BatchCounts::new();
        counts.record(Tally::Unresolved);
        counts.record(Tally::Unresolved);
        counts.record(Tally::ManualIntervention);
        assert_eq!(counts.unresolved, 2);
        assert_eq!(counts.manual_intervention, 1);
        assert_eq!(counts.nonsensical, 0);
    }

    #[test]
    fn test_dedup_reports_first_occurrence_only() {
        let mut dedup = MessageDedup::new();
        assert!(dedup.first_occurrence("titles differ"));
        assert!(!dedup.first_occurrence("titles differ"));
        assert!(dedup.first_occurrence("bad position"));
    }
}
