//! Domain model for a triage run.
//!
//! Tickets come in from the PSA backend, triage results go back out. Both
//! are immutable once built: an update to a ticket is expressed as a
//! separate [`TriageResult`], never by mutating the [`Ticket`].

mod page;
mod ticket;
mod triage;

pub use page::TicketPage;
pub use ticket::Ticket;
pub use triage::{Priority, TriageResult};
