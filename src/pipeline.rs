// src/pipeline.rs
//! Pipeline capability traits: the three collaborators a triage run talks to.
//!
//! Each trait describes a single capability so every stage can be tested in
//! isolation, and so the run itself never depends on HTTP details.

use crate::error::{AppError, TicketFailure};
use crate::model::{TicketPage, TriageResult};
use crate::types::{ClientId, PageSize, TicketId};

/// Narrows which tickets a source returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketScope {
    pub open_only: bool,
    pub client_id: Option<ClientId>,
}

/// Retrieves tickets one page at a time.
#[async_trait::async_trait]
pub trait TicketSource: Send + Sync {
    /// Fetches page `page_number` (1-based). Failures are retrieval errors.
    async fn fetch_page(
        &self,
        page_number: u32,
        page_size: PageSize,
        scope: &TicketScope,
    ) -> Result<TicketPage, AppError>;
}

/// Turns a ticket description into a structured triage recommendation.
#[async_trait::async_trait]
pub trait TriageEngine: Send + Sync {
    async fn generate_triage(
        &self,
        ticket_id: &TicketId,
        description: &str,
    ) -> Result<TriageResult, TicketFailure>;
}

/// Applies a triage recommendation back onto its ticket.
#[async_trait::async_trait]
pub trait TicketSink: Send + Sync {
    async fn apply_triage(
        &self,
        ticket_id: &TicketId,
        result: &TriageResult,
    ) -> Result<(), TicketFailure>;
}
