// src/report/mod.rs
//! Run accounting and the end-of-run summary.

mod metrics;
mod render;
mod summary;

pub use metrics::RunMetrics;
pub use render::{render, RunReport};
pub use summary::{RunStatus, RunSummary};
