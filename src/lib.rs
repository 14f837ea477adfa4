// src/lib.rs
//! psa-triage library: retrieves PSA tickets, selects them by id pattern,
//! generates an LLM triage for each one under a bounded retry policy, and
//! reports the outcome of the run.
//!
//! # Public API
//!
//! - **Error handling**: `AppError`, `TicketFailure`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PipelineConfig`, `RunSettings`
//! - **Domain model**: `Ticket`, `TicketPage`, `TriageResult`, `Priority`
//! - **Pipeline traits**: `TicketSource`, `TriageEngine`, `TicketSink`
//! - **Adapters**: `PsaHttpClient`, `FileTicketSource`, `SimulatedTicketSink`,
//!   `LlmTriageEngine`
//! - **Run**: `TriageRun`, `RetryingProcessor`, `RunMetrics`, `RunSummary`

pub mod api;
mod config;
pub mod constants;
mod context;
mod error;
mod error_recovery;
pub mod filter;
pub mod logging;
mod model;
pub mod output;
mod pipeline;
mod processor;
pub mod report;
mod run;
pub mod triage;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, PsaErrorCode, TicketFailure};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, CompletionSettings, PipelineConfig, PsaConnection};
pub use crate::context::{RunContext, RunSettings};

// --- Domain Model ---
pub use crate::model::{Priority, Ticket, TicketPage, TriageResult};

// --- Domain Types ---
pub use crate::types::{ApiKey, ClientId, PageSize, TicketId, TicketPattern, ValidatedUrl};

// --- Pipeline Traits ---
pub use crate::pipeline::{TicketScope, TicketSink, TicketSource, TriageEngine};

// --- Adapters ---
pub use crate::api::{
    collect_all_tickets, ApiResponse, FileTicketSource, PsaHttpClient, SimulatedTicketSink,
};
pub use crate::triage::{LlmTriageEngine, OpenAiClient};

// --- Run ---
pub use crate::error_recovery::{retry_with_fixed_backoff, RetryOutcome, RetryPolicy};
pub use crate::filter::TicketFilter;
pub use crate::processor::{BatchOutcome, ProcessedTicket, RetryingProcessor, TicketState};
pub use crate::report::{render, RunMetrics, RunReport, RunStatus, RunSummary};
pub use crate::run::{RunOutcome, TriageRun};
