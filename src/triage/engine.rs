// src/triage/engine.rs
//! LLM-backed triage engine and the parser for its JSON payload.

use super::llm::{CompletionRequest, LlmClient, LlmError};
use super::prompt::{TriagePrompt, SYSTEM_PROMPT};
use crate::constants::TRIAGE_MAX_TOKENS;
use crate::error::{AppError, TicketFailure};
use crate::model::{Priority, TriageResult};
use crate::pipeline::TriageEngine;
use crate::types::TicketId;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Triage engine that asks a completion service for a JSON recommendation.
pub struct LlmTriageEngine<C: LlmClient> {
    client: Arc<C>,
    prompt: TriagePrompt,
    max_tokens: u32,
}

impl<C: LlmClient> LlmTriageEngine<C> {
    pub fn new(client: Arc<C>) -> Result<Self, AppError> {
        Ok(Self {
            client,
            prompt: TriagePrompt::new()?,
            max_tokens: TRIAGE_MAX_TOKENS,
        })
    }
}

#[async_trait::async_trait]
impl<C: LlmClient> TriageEngine for LlmTriageEngine<C> {
    async fn generate_triage(
        &self,
        ticket_id: &TicketId,
        description: &str,
    ) -> Result<TriageResult, TicketFailure> {
        let prompt = self
            .prompt
            .render(ticket_id.as_str(), description)
            .map_err(|e| TicketFailure::TriageGeneration(format!("prompt rendering failed: {}", e)))?;

        let request = CompletionRequest::new(prompt)
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(self.max_tokens)
            .with_json_output();

        let response = self
            .client
            .complete(request)
            .await
            .map_err(|e: LlmError| {
                TicketFailure::TriageGeneration(format!("model {}: {}", self.client.model(), e))
            })?;

        log::debug!(
            "ticket={} model={} served_by={} input_tokens={} output_tokens={}",
            ticket_id,
            self.client.model(),
            response.model,
            response.usage.input_tokens,
            response.usage.output_tokens
        );

        parse_triage_response(ticket_id, &response.text)
    }
}

/// Wire shape of the triage payload. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriagePayload {
    #[serde(default)]
    ticket_id: Option<String>,
    priority: String,
    actionable_steps: Vec<String>,
    #[serde(default)]
    comments: Option<String>,
}

/// Parses completion text into a [`TriageResult`] for `expected`.
///
/// Tolerates prose or code fences around the object. Rejects missing
/// required fields, unknown priorities, an empty step list and a
/// `ticketId` naming a different ticket; a missing `ticketId` is filled in.
pub fn parse_triage_response(expected: &TicketId, text: &str) -> Result<TriageResult, TicketFailure> {
    let object = first_json_object(text)
        .ok_or_else(|| TicketFailure::TriageParse(format!("no JSON object in response: {}", text)))?;

    let payload: TriagePayload = serde_json::from_value(object)
        .map_err(|e| TicketFailure::TriageParse(format!("{} - response: {}", e, text)))?;

    let priority: Priority = payload
        .priority
        .parse()
        .map_err(TicketFailure::TriageParse)?;

    let actionable_steps: Vec<String> = payload
        .actionable_steps
        .into_iter()
        .map(|step| step.trim().to_string())
        .filter(|step| !step.is_empty())
        .collect();
    if actionable_steps.is_empty() {
        return Err(TicketFailure::TriageParse(
            "actionableSteps must contain at least one step".to_string(),
        ));
    }

    match payload.ticket_id.as_deref().map(str::trim) {
        None | Some("") => {
            log::debug!("ticket={} triage payload omitted ticketId", expected);
        }
        Some(id) if id == expected.as_str() => {}
        Some(other) => {
            return Err(TicketFailure::TriageParse(format!(
                "ticketId '{}' does not match ticket '{}'",
                other, expected
            )));
        }
    }

    Ok(TriageResult {
        ticket_id: expected.clone(),
        priority,
        actionable_steps,
        comments: payload.comments.unwrap_or_default(),
    })
}

/// Reads the first complete JSON object in `text`, ignoring whatever
/// follows it. Each `{` is tried in turn until one opens a valid object.
fn first_json_object(text: &str) -> Option<Value> {
    text.match_indices('{').find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Value>()
            .next()
            .and_then(Result::ok)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::llm::{CompletionResponse, LlmUsage};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> TicketId {
        TicketId::new(s).unwrap()
    }

    #[test]
    fn test_valid_payload() {
        let text = r#"{"ticketId": "TICKET-1", "priority": "high",
            "actionableSteps": ["Check SSO status", "Reset session"], "comments": ""}"#;

        let result = parse_triage_response(&id("TICKET-1"), text).unwrap();

        assert_eq!(result.priority, Priority::High);
        assert_eq!(
            result.actionable_steps,
            vec!["Check SSO status".to_string(), "Reset session".to_string()]
        );
        assert_eq!(result.comments, "");
    }

    #[test]
    fn test_code_fenced_payload_with_extra_fields() {
        let text = "```json\n{\"ticketId\":\"T-1\",\"priority\":\"low\",\"actionableSteps\":[\"a\"],\"comments\":\"c\",\"confidence\":0.9}\n```";
        let result = parse_triage_response(&id("T-1"), text).unwrap();
        assert_eq!(result.comments, "c");
    }

    #[test]
    fn test_braces_in_surrounding_prose() {
        let text = "Note {draft}: {\"ticketId\":\"T-1\",\"priority\":\"high\",\"actionableSteps\":[\"Restart {service}\"]}\nSee runbook {section 4} for details.";
        let result = parse_triage_response(&id("T-1"), text).unwrap();
        assert_eq!(result.priority, Priority::High);
        assert_eq!(result.actionable_steps, vec!["Restart {service}".to_string()]);
    }

    #[test]
    fn test_missing_ticket_id_is_filled_in() {
        let text = r#"{"priority": "medium", "actionableSteps": ["a"]}"#;
        let result = parse_triage_response(&id("T-7"), text).unwrap();
        assert_eq!(result.ticket_id.as_str(), "T-7");
        assert_eq!(result.comments, "");
    }

    #[test]
    fn test_rejections() {
        let expected = id("T-1");
        let cases = [
            "not json at all",
            r#"{"ticketId": "T-1", "actionableSteps": ["a"]}"#,
            r#"{"ticketId": "T-1", "priority": "urgent", "actionableSteps": ["a"]}"#,
            r#"{"ticketId": "T-1", "priority": "low", "actionableSteps": []}"#,
            r#"{"ticketId": "T-1", "priority": "low", "actionableSteps": ["  "]}"#,
            r#"{"ticketId": "T-2", "priority": "low", "actionableSteps": ["a"]}"#,
            r#"{"ticketId": "T-1", "priority": "low", "actionableSteps": "a"}"#,
        ];

        for text in cases {
            let result = parse_triage_response(&expected, text);
            assert!(
                matches!(result, Err(TicketFailure::TriageParse(_))),
                "expected parse failure for {:?}, got {:?}",
                text,
                result
            );
        }
    }

    struct ScriptedClient {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl LlmClient for ScriptedClient {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.prompts.lock().push(request.prompt);
            let text = self.replies.lock().remove(0)?;
            Ok(CompletionResponse {
                text,
                usage: LlmUsage::default(),
                model: "scripted".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_engine_maps_client_failures_to_generation_errors() {
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(vec![Err(LlmError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            })]),
            prompts: Mutex::new(Vec::new()),
        });
        let engine = LlmTriageEngine::new(client).unwrap();

        let result = engine.generate_triage(&id("T-1"), "disk full").await;

        match result {
            Err(TicketFailure::TriageGeneration(message)) => {
                assert!(message.starts_with("model scripted:"), "{}", message);
                assert!(message.contains("quota exceeded"), "{}", message);
            }
            other => panic!("expected a generation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_engine_sends_description_in_prompt() {
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(vec![Ok(
                r#"{"ticketId":"T-1","priority":"low","actionableSteps":["Free space"],"comments":""}"#
                    .to_string(),
            )]),
            prompts: Mutex::new(Vec::new()),
        });
        let engine = LlmTriageEngine::new(client.clone()).unwrap();

        let result = engine.generate_triage(&id("T-1"), "disk full").await.unwrap();

        assert_eq!(result.priority, Priority::Low);
        assert!(client.prompts.lock()[0].contains("disk full"));
    }
}
