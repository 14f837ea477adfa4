// src/constants.rs
//! Domain constants that define the operational boundaries of a triage run.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them in order tells the story of a run: how tickets are paged in, how
//! long a failed ticket waits before it is tried again, and what the
//! completion service is asked for.

use std::time::Duration;

// ---------------------------------------------------------------------------
// PSA retrieval
// ---------------------------------------------------------------------------

/// Tickets requested per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Retries granted to a ticket after its first failed attempt.
///
/// Zero means every ticket gets exactly one attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Fixed pause between a failed attempt and the next one for the same ticket.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Ticket update
// ---------------------------------------------------------------------------

/// Artificial latency of the simulated ticket update, in milliseconds.
pub const SIMULATED_UPDATE_DELAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Completion service
// ---------------------------------------------------------------------------

/// Completion endpoint used when `OPENAI_BASE_URL` is not set.
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when neither `--model` nor `TRIAGE_MODEL` is given.
pub const DEFAULT_TRIAGE_MODEL: &str = "gpt-4o-mini";

/// Upper bound on generated tokens for one triage recommendation.
pub const TRIAGE_MAX_TOKENS: u32 = 800;

/// Per-request timeout for calls to the completion service.
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-request timeout for calls to the PSA backend.
pub const PSA_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Directory that receives run log files when `--log-dir` is not given.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Shared line layout for console and file appenders.
pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";
