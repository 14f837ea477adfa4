// src/api/file_source.rs
//! Ticket source backed by a local JSON export, for offline runs.

use super::parser::{parse_ticket_list, tickets_from_records};
use crate::error::AppError;
use crate::model::{Ticket, TicketPage};
use crate::pipeline::{TicketScope, TicketSource};
use crate::types::PageSize;
use std::path::Path;

/// Serves tickets loaded from a file through the paging contract.
///
/// Accepts the same bare or enveloped bodies as the live endpoint. Scope is
/// not applied: an export is assumed to already be the set to work on.
#[derive(Debug, Clone)]
pub struct FileTicketSource {
    tickets: Vec<Ticket>,
}

impl FileTicketSource {
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let body = tokio::fs::read_to_string(path).await?;
        let records = parse_ticket_list(&body).map_err(|e| match e {
            AppError::MalformedResponse(reason) => AppError::JsonParseError {
                path: path.to_path_buf(),
                source: serde::de::Error::custom(reason),
            },
            other => other,
        })?;
        let tickets = tickets_from_records(&records);
        log::info!("Loaded {} ticket(s) from {}", tickets.len(), path.display());
        Ok(Self { tickets })
    }

    pub fn from_tickets(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[async_trait::async_trait]
impl TicketSource for FileTicketSource {
    async fn fetch_page(
        &self,
        page_number: u32,
        page_size: PageSize,
        _scope: &TicketScope,
    ) -> Result<TicketPage, AppError> {
        if page_number == 0 {
            return Err(AppError::InternalError {
                message: "page numbers start at 1".to_string(),
                source: None,
            });
        }

        let start = (page_number as usize - 1).saturating_mul(page_size.as_usize());
        let items = self
            .tickets
            .iter()
            .skip(start)
            .take(page_size.as_usize())
            .cloned()
            .collect();

        Ok(TicketPage::new(page_number, items))
    }
}
