// src/error.rs
//! Application error types with structured error handling.
//!
//! Two vocabularies live here. [`AppError`] describes failures that end a
//! run: bad configuration, an unreachable backend, a run that ran out of
//! time. [`TicketFailure`] describes why a single triage attempt failed;
//! those are absorbed by the retrying processor and never end a run.

use std::fmt;
use thiserror::Error;

/// PSA backend error classes, derived from the HTTP status of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsaErrorCode {
    /// Credential rejected
    Unauthorized,
    /// Credential valid but not allowed to read this resource
    Forbidden,
    /// Endpoint or record does not exist
    NotFound,
    /// API rate limit exceeded
    RateLimited,
    /// Backend failed or is temporarily unavailable
    ServerError(u16),
    /// Any other non-success status
    HttpStatus(u16),
}

impl PsaErrorCode {
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status),
            other => Self::HttpStatus(other),
        }
    }

    /// Whether the failure points at credentials rather than the backend.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}

impl fmt::Display for PsaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ServerError(code) => write!(f, "server_error_{}", code),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("PSA backend returned an error ({code}): {message}")]
    PsaService {
        code: PsaErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Ticket retrieval failed on page {page}: {source}")]
    RetrievalFailed {
        page: u32,
        #[source]
        source: Box<AppError>,
    },

    #[error("Run deadline of {limit_secs}s exceeded with {skipped} ticket(s) not started")]
    DeadlineExceeded { limit_secs: u64, skipped: usize },

    #[error("Failed to deliver run summary: {}", failures.join("; "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Process exit code for a run that ended with this error.
    ///
    /// Completed runs exit 0 even when some tickets exhausted their retries.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingConfiguration(_) | Self::ValidationError(_) => 2,
            Self::RetrievalFailed { .. } => 3,
            Self::DeadlineExceeded { .. } => 4,
            _ => 1,
        }
    }

    /// Wraps a page-level failure so the summary names the page that broke.
    pub fn retrieval(page: u32, source: AppError) -> Self {
        Self::RetrievalFailed {
            page,
            source: Box::new(source),
        }
    }
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<log::SetLoggerError> for AppError {
    fn from(err: log::SetLoggerError) -> Self {
        AppError::Logging(err.to_string())
    }
}

/// Why a single triage attempt for one ticket failed.
///
/// All variants are retryable; the processor does not distinguish them in
/// its accounting, only in the log line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketFailure {
    /// The completion call itself failed (network, auth, quota).
    #[error("triage generation failed: {0}")]
    TriageGeneration(String),

    /// The completion text did not match the triage payload schema.
    #[error("triage response could not be parsed: {0}")]
    TriageParse(String),

    /// The ticket update was rejected or could not be sent.
    #[error("ticket update failed: {0}")]
    Update(String),
}

impl TicketFailure {
    /// Short label used in structured log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TriageGeneration(_) => "triage_generation",
            Self::TriageParse(_) => "triage_parse",
            Self::Update(_) => "update",
        }
    }
}
