// src/filter.rs
//! Ticket selection by identifier pattern.

use crate::error::AppError;
use crate::model::Ticket;
use crate::types::TicketPattern;

/// Returns true when `pattern` matches anywhere in `ticket_id`.
///
/// The pattern is compiled on every call; use [`TicketFilter`] when the same
/// pattern is applied to many tickets.
pub fn matches(ticket_id: &str, pattern: &str) -> Result<bool, AppError> {
    let pattern = TicketPattern::new(pattern)?;
    Ok(pattern.is_match(ticket_id))
}

/// Selects the tickets a run will triage.
#[derive(Debug, Clone)]
pub struct TicketFilter {
    pattern: TicketPattern,
}

impl TicketFilter {
    pub fn new(pattern: TicketPattern) -> Self {
        Self { pattern }
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.pattern.is_match(ticket.id.as_str())
    }

    /// Keeps matching tickets in their retrieval order.
    pub fn select(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        let matched: Vec<Ticket> = tickets
            .into_iter()
            .filter(|ticket| self.matches(ticket))
            .collect();

        for ticket in &matched {
            log::info!("event=ticket_matched ticket={}", ticket.id);
        }

        matched
    }
}
