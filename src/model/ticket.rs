// src/model/ticket.rs
use crate::types::TicketId;
use serde::Serialize;

/// One work item to triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub description: Option<String>,
}

impl Ticket {
    pub fn new(id: TicketId, description: Option<String>) -> Self {
        Self { id, description }
    }

    /// The text handed to the triage engine.
    ///
    /// Missing or blank descriptions fall back to a placeholder so the
    /// engine always receives something to classify. Any other description
    /// is passed through unchanged.
    pub fn effective_description(&self) -> String {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => placeholder_description(&self.id),
        }
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

fn placeholder_description(id: &TicketId) -> String {
    format!("No detailed description available for ticket {}.", id)
}
