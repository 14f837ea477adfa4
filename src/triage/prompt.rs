// src/triage/prompt.rs
//! Prompt construction for triage requests.

use crate::error::AppError;
use handlebars::Handlebars;
use serde::Serialize;

const TEMPLATE_NAME: &str = "triage_prompt";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/triage_prompt.hbs");

/// Instructions sent as the system message of every triage request.
pub const SYSTEM_PROMPT: &str = "You are an IT service desk triage assistant. \
Classify the ticket's urgency and propose ordered, concrete remediation steps \
a technician can follow. Respond with JSON only, no prose and no code fences.";

#[derive(Serialize)]
struct PromptData<'a> {
    ticket_id: &'a str,
    description: &'a str,
}

/// Compiled user-prompt template.
pub struct TriagePrompt {
    registry: Handlebars<'static>,
}

impl TriagePrompt {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        // Ticket text is plain text, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .map_err(|e| AppError::InternalError {
                message: format!("triage prompt template is invalid: {}", e),
                source: None,
            })?;
        Ok(Self { registry })
    }

    pub fn render(&self, ticket_id: &str, description: &str) -> Result<String, handlebars::RenderError> {
        self.registry.render(
            TEMPLATE_NAME,
            &PromptData {
                ticket_id,
                description,
            },
        )
    }
}
