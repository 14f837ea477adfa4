// src/api/mod.rs
//! PSA backend interaction: retrieving tickets and writing triage back.
//!
//! Business logic depends on the traits in [`crate::pipeline`], never on the
//! HTTP details kept here.

pub mod client;
mod file_source;
pub mod pagination;
pub mod parser;
mod responses;
mod sink;

pub use client::{ApiResponse, PsaHttpClient};
pub use file_source::FileTicketSource;
pub use pagination::{collect_all_tickets, PaginationResult};
pub use responses::RawTicketRecord;
pub use sink::SimulatedTicketSink;
