// src/output/mod.rs
//! Delivery of the run summary document.
//!
//! Planning which destinations receive the summary is kept apart from the
//! I/O that writes it, so the plan can be built and inspected in tests.

mod types;
mod writer;

pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
