//! Outcome reporting for a reconciliation run.

use chrono::{DateTime, Utc};

/// Result of a reconciliation run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Number of assignments created.
    pub added: usize,

    /// Number of assignments deleted.
    pub removed: usize,

    /// Number of principals that were already in the desired state.
    pub unchanged: usize,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,
}

impl SyncReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            added: 0,
            removed: 0,
            unchanged: 0,
            started_at,
            completed_at: started_at,
        }
    }

    /// Marks the run as complete.
    #[must_use]
    pub fn complete(mut self) -> Self {
        self.completed_at = Utc::now();
        self
    }

    /// Records an applied addition.
    pub fn record_added(&mut self) {
        self.added += 1;
    }

    /// Records an applied removal.
    pub fn record_removed(&mut self) {
        self.removed += 1;
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        format!(
            "Sync completed: {} added, {} removed, {} unchanged",
            self.added, self.removed, self.unchanged
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut report = SyncReport::new(Utc::now());
        report.record_added();
        report.record_added();
        report.record_removed();
        report.unchanged = 3;

        let report = report.complete();
        assert_eq!(report.summary(), "Sync completed: 2 added, 1 removed, 3 unchanged");
        assert!(report.completed_at >= report.started_at);
    }
}
