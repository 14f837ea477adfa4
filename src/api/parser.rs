// src/api/parser.rs
//! Converts PSA responses into validated domain tickets.
//!
//! This is the boundary where loosely-typed records are checked: ids are
//! normalized from strings or numbers, descriptions default to `None` when
//! missing, null or not text. Records without a usable id are dropped with
//! a warning rather than failing the page.

use super::client::ApiResponse;
use super::responses::{
    find_ci, lookup_ci, RawTicketRecord, TicketListResponse, COLLECTION_KEYS, DESCRIPTION_KEYS, ID_KEYS,
};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, PsaErrorCode};
use crate::model::{Ticket, TicketPage};
use crate::types::{TicketId, ValidationError};
use serde_json::Value;

/// Parses one page response from the ticket list endpoint.
pub fn parse_ticket_page(page_number: u32, result: ApiResponse<String>) -> Result<TicketPage, AppError> {
    if !result.status.is_success() {
        return Err(error_from_response(&result));
    }

    let records = parse_ticket_list(&result.data).map_err(|e| {
        log::error!("Failed to parse ticket list from {}: {}", result.url, e);
        e
    })?;
    let received = records.len();
    let tickets = tickets_from_records(&records);

    Ok(TicketPage::new(page_number, tickets).with_received(received))
}

/// Builds a PSA service error from a non-success response.
pub fn error_from_response(result: &ApiResponse<String>) -> AppError {
    AppError::PsaService {
        code: PsaErrorCode::from_http_status(result.status.as_u16()),
        message: format!("HTTP {} from {}: {}", result.status, result.url, preview(&result.data)),
        status: result.status,
    }
}

/// Extracts the record array from a bare or enveloped list body.
pub fn parse_ticket_list(body: &str) -> Result<Vec<RawTicketRecord>, AppError> {
    let response: TicketListResponse = serde_json::from_str(body).map_err(|e| {
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })?;

    match response {
        TicketListResponse::Bare(records) => Ok(records),
        TicketListResponse::Envelope(envelope) => {
            let collection = lookup_ci(&envelope, COLLECTION_KEYS).ok_or_else(|| {
                AppError::MalformedResponse(format!(
                    "no ticket collection found; expected one of {:?}",
                    COLLECTION_KEYS
                ))
            })?;
            serde_json::from_value(collection.clone()).map_err(|e| {
                AppError::MalformedResponse(format!("ticket collection is not a record array: {}", e))
            })
        }
    }
}

/// Converts records to tickets, dropping the ones without a usable id.
pub fn tickets_from_records(records: &[RawTicketRecord]) -> Vec<Ticket> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match ticket_from_record(record) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                log::warn!("Dropping ticket record #{}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Converts a single property bag into a [`Ticket`].
pub fn ticket_from_record(record: &RawTicketRecord) -> Result<Ticket, ValidationError> {
    let id = match lookup_ci(record, ID_KEYS) {
        Some(Value::String(s)) => TicketId::new(s.as_str())?,
        Some(Value::Number(n)) => TicketId::new(n.to_string())?,
        Some(other) => {
            return Err(ValidationError::InvalidTicketId(format!(
                "unsupported id value: {}",
                other
            )))
        }
        None => return Err(ValidationError::EmptyField("id")),
    };

    let description = find_ci(record, DESCRIPTION_KEYS, is_text)
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Ticket::new(id, description))
}

/// A string with at least one non-whitespace character.
fn is_text(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
