// src/report/metrics.rs
use crate::types::TicketId;
use serde::Serialize;

/// Counters for a single run.
///
/// Only the processor mutates these, once per ticket terminal outcome, so
/// `processed == succeeded + failed` holds after every update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    processed: usize,
    succeeded: usize,
    failed: usize,
    failed_ticket_ids: Vec<TicketId>,
    skipped: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, ticket_id: TicketId) {
        self.processed += 1;
        self.failed += 1;
        self.failed_ticket_ids.push(ticket_id);
    }

    /// Counts matched tickets that were never attempted.
    pub fn record_skipped(&mut self, count: usize) {
        self.skipped += count;
    }

    pub fn processed_count(&self) -> usize {
        self.processed
    }

    pub fn success_count(&self) -> usize {
        self.succeeded
    }

    pub fn error_count(&self) -> usize {
        self.failed
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    pub fn failed_ticket_ids(&self) -> &[TicketId] {
        &self.failed_ticket_ids
    }

    /// Checks the accounting invariants.
    pub fn is_consistent(&self) -> bool {
        self.processed == self.succeeded + self.failed
            && self.failed_ticket_ids.len() == self.failed
    }
}
