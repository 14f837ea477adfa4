// src/api/responses.rs
//! Raw response shapes from the PSA backend.
//!
//! Ticket records arrive as loosely-typed property bags whose key casing
//! varies between endpoints and tenants ("id", "Id", "ticketId"). They are
//! kept as ordered maps here and only become [`Ticket`]s in the parser.
//!
//! [`Ticket`]: crate::model::Ticket

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// One untyped ticket record.
pub type RawTicketRecord = IndexMap<String, Value>;

/// The body of a ticket list response.
///
/// Some backends answer with a bare array, others wrap it in an envelope
/// whose collection key differs by product.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TicketListResponse {
    Bare(Vec<RawTicketRecord>),
    Envelope(IndexMap<String, Value>),
}

/// Envelope keys that may hold the record array, checked in order.
pub const COLLECTION_KEYS: &[&str] = &["tickets", "items", "results", "data", "value"];

/// Keys that may hold a ticket's identifier, checked in order.
pub const ID_KEYS: &[&str] = &["id", "ticketid", "ticket_id", "ticketnumber"];

/// Keys that may hold a ticket's description, checked in order.
pub const DESCRIPTION_KEYS: &[&str] = &["description", "details", "body"];

/// Looks up `keys` in `record` ignoring ASCII case. The first key holding
/// a non-null value wins; a `null` falls through to the next key.
pub fn lookup_ci<'a>(record: &'a IndexMap<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    find_ci(record, keys, |value| !value.is_null())
}

/// Looks up `keys` in `record` ignoring ASCII case and returns the first
/// value `accept` allows.
pub fn find_ci<'a, F>(record: &'a IndexMap<String, Value>, keys: &[&str], accept: F) -> Option<&'a Value>
where
    F: Fn(&Value) -> bool,
{
    keys.iter().find_map(|wanted| {
        record
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value)
            .find(|value| accept(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_prefers_earlier_keys() {
        let record: RawTicketRecord =
            serde_json::from_str(r#"{"TicketNumber": "T-2", "ID": "T-1"}"#).unwrap();
        assert_eq!(lookup_ci(&record, ID_KEYS), Some(&Value::from("T-1")));
    }

    #[test]
    fn test_null_falls_through_to_next_key() {
        let record: RawTicketRecord =
            serde_json::from_str(r#"{"id": null, "ticketNumber": "T-5"}"#).unwrap();
        assert_eq!(lookup_ci(&record, ID_KEYS), Some(&Value::from("T-5")));
    }

    #[test]
    fn test_find_ci_applies_predicate() {
        let record: RawTicketRecord =
            serde_json::from_str(r#"{"description": "  ", "body": "text"}"#).unwrap();
        let found = find_ci(&record, DESCRIPTION_KEYS, |v| {
            v.as_str().is_some_and(|s| !s.trim().is_empty())
        });
        assert_eq!(found, Some(&Value::from("text")));
    }

    #[test]
    fn test_bare_and_enveloped_bodies() {
        let bare: TicketListResponse = serde_json::from_str(r#"[{"id": 1}]"#).unwrap();
        assert!(matches!(bare, TicketListResponse::Bare(ref v) if v.len() == 1));

        let wrapped: TicketListResponse =
            serde_json::from_str(r#"{"tickets": [{"id": 1}], "total": 1}"#).unwrap();
        assert!(matches!(wrapped, TicketListResponse::Envelope(_)));
    }
}
