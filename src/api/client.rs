// src/api/client.rs
//! HTTP client for the PSA REST API.
//!
//! Handles authentication and request plumbing; parsing lives in
//! [`super::parser`]. The same client serves as the live ticket source and,
//! when updates are enabled, as the ticket sink.

use super::parser;
use crate::constants::PSA_REQUEST_TIMEOUT;
use crate::error::{AppError, TicketFailure};
use crate::model::{TicketPage, TriageResult};
use crate::pipeline::{TicketScope, TicketSink, TicketSource};
use crate::types::{ApiKey, PageSize, TicketId, ValidatedUrl};
use reqwest::{header, Client, Response};
use serde::Serialize;

/// A thin wrapper around reqwest Client for PSA API requests.
#[derive(Clone)]
pub struct PsaHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl PsaHttpClient {
    /// Creates a new HTTP client with PSA bearer authentication.
    pub fn new(base_url: ValidatedUrl, api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(PSA_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid PSA API token format: {}", e))
            })?,
        );

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request with query parameters.
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = self.base_url.endpoint(endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.base_url.endpoint(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

/// Query parameters for one page of the ticket list.
fn page_query(page_number: u32, page_size: PageSize, scope: &TicketScope) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", page_number.to_string()),
        ("pageSize", page_size.to_string()),
    ];
    if scope.open_only {
        query.push(("openOnly", "true".to_string()));
    }
    if let Some(client_id) = &scope.client_id {
        query.push(("clientId", client_id.to_string()));
    }
    query
}

#[async_trait::async_trait]
impl TicketSource for PsaHttpClient {
    async fn fetch_page(
        &self,
        page_number: u32,
        page_size: PageSize,
        scope: &TicketScope,
    ) -> Result<TicketPage, AppError> {
        let query = page_query(page_number, page_size, scope);
        let response = self.get("tickets", &query).await?;
        let result = extract_response_text(response).await?;
        parser::parse_ticket_page(page_number, result)
    }
}

/// Note body posted to a ticket when triage is applied for real.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriageNote<'a> {
    title: &'static str,
    text: String,
    internal: bool,
    triage: &'a TriageResult,
}

#[async_trait::async_trait]
impl TicketSink for PsaHttpClient {
    async fn apply_triage(&self, ticket_id: &TicketId, result: &TriageResult) -> Result<(), TicketFailure> {
        let note = TriageNote {
            title: "Automated triage",
            text: result.to_note(),
            internal: true,
            triage: result,
        };
        let endpoint = format!("tickets/{}/notes", urlencoding_segment(ticket_id.as_str()));

        let response = self
            .post(&endpoint, &note)
            .await
            .map_err(|e| TicketFailure::Update(e.to_string()))?;
        let result = extract_response_text(response)
            .await
            .map_err(|e| TicketFailure::Update(e.to_string()))?;

        if !result.status.is_success() {
            return Err(TicketFailure::Update(
                parser::error_from_response(&result).to_string(),
            ));
        }

        log::info!("event=ticket_updated ticket={} mode=live", ticket_id);
        Ok(())
    }
}

/// Percent-encodes a ticket id for use as a single path segment.
fn urlencoding_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClientId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_query_carries_scope() {
        let scope = TicketScope {
            open_only: true,
            client_id: Some(ClientId::new("acme").unwrap()),
        };
        let query = page_query(2, PageSize::new(50).unwrap(), &scope);
        assert_eq!(
            query,
            vec![
                ("page", "2".to_string()),
                ("pageSize", "50".to_string()),
                ("openOnly", "true".to_string()),
                ("clientId", "acme".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_query_without_scope() {
        let query = page_query(1, PageSize::default(), &TicketScope::default());
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_ticket_id_path_segment_is_encoded() {
        assert_eq!(urlencoding_segment("TICKET 1/2"), "TICKET%201%2F2");
        assert_eq!(urlencoding_segment("TICKET-1"), "TICKET-1");
    }
}
