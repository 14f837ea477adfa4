// src/triage/mod.rs
//! Triage generation through a text-completion service.

mod engine;
pub mod llm;
mod prompt;

pub use engine::{parse_triage_response, LlmTriageEngine};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage, OpenAiClient};
pub use prompt::{TriagePrompt, SYSTEM_PROMPT};
