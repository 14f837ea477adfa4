// src/api/pagination.rs
//! Drives a ticket source page by page until the data runs out.

use crate::error::AppError;
use crate::model::Ticket;
use crate::pipeline::{TicketScope, TicketSource};
use crate::types::PageSize;

/// Result of a pagination operation.
#[derive(Debug, Clone, Default)]
pub struct PaginationResult {
    pub items: Vec<Ticket>,
    pub pages_fetched: u32,
}

/// Fetches pages 1, 2, ... and accumulates their tickets in order.
///
/// Stops after an empty or short page, or after `max_pages` calls. The first
/// failing page aborts retrieval; page fetches are never retried.
pub async fn collect_all_tickets(
    source: &dyn TicketSource,
    page_size: PageSize,
    scope: &TicketScope,
    max_pages: Option<u32>,
) -> Result<PaginationResult, AppError> {
    let mut all_items = Vec::new();
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::warn!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let page_number = pages_fetched + 1;
        let page = source
            .fetch_page(page_number, page_size, scope)
            .await
            .map_err(|e| {
                log::error!("event=page_failed page={} error={}", page_number, e);
                AppError::retrieval(page_number, e)
            })?;
        pages_fetched += 1;

        let is_last = page.is_last(page_size.as_usize());
        log::info!(
            "event=page_retrieved page={} items={} total={}",
            page.page_number,
            page.len(),
            all_items.len() + page.len()
        );
        all_items.extend(page.items);

        if is_last {
            break;
        }
    }

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}
