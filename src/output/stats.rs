//! Batch statistics
//!
//! Counts what happened to every submitted URL so the run can be summarized
//! in the log once the pool has drained.

use crate::extract::EnrichedRecord;
use std::time::Duration;

/// Summary of a finished batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// URLs dispatched to the pool
    pub submitted: u64,

    /// URLs that produced a record
    pub succeeded: u64,

    /// URLs whose fetch failed after every retry
    pub failed: u64,

    /// Records with at least one phone number
    pub with_phones: u64,

    /// Records with a logo
    pub with_logo: u64,

    /// Wall-clock time of the batch
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a successfully produced record
    pub fn record_success(&mut self, record: &EnrichedRecord) {
        self.succeeded += 1;
        if !record.phones.is_empty() {
            self.with_phones += 1;
        }
        if !record.logo.is_empty() {
            self.with_logo += 1;
        }
    }

    /// Counts a failed unit
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Returns true when any unit failed
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.submitted == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.submitted as f64) * 100.0
    }

    /// Writes the summary to the log
    pub fn log(&self) {
        tracing::info!(
            "Batch finished in {:?}: {} submitted, {} succeeded, {} failed ({:.1}% success)",
            self.elapsed,
            self.submitted,
            self.succeeded,
            self.failed,
            self.success_rate()
        );
        tracing::info!(
            "Records with phones: {}, with logo: {}",
            self.with_phones,
            self.with_logo
        );
    }
}
