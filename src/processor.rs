// src/processor.rs
//! The retrying processor: triage then update each matched ticket under a
//! bounded retry policy, recording one terminal outcome per ticket.
//!
//! Per-ticket lifecycle:
//!
//! ```text
//! attempt 1 -> attempt 2 -> ... -> Succeeded | Exhausted
//! ```
//!
//! Attempt `n` ends the ticket as `Succeeded` when both the engine and the
//! sink succeed. On any failure attempt `n + 1` starts after the fixed
//! backoff while `n <= max_retries`, otherwise the ticket is `Exhausted`.

use crate::context::RunContext;
use crate::error::TicketFailure;
use crate::error_recovery::{retry_with_fixed_backoff, RetryPolicy};
use crate::model::Ticket;
use crate::pipeline::{TicketSink, TriageEngine};
use crate::types::TicketId;

/// How a ticket left the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketState {
    Succeeded { attempts: u32 },
    Exhausted {
        attempts: u32,
        last_failure: TicketFailure,
    },
}

impl TicketState {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Number of attempts made.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Terminal state of one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedTicket {
    pub ticket_id: TicketId,
    pub state: TicketState,
}

/// What happened to a batch of matched tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub tickets: Vec<ProcessedTicket>,
    /// Tickets never started because the run deadline passed.
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn deadline_hit(&self) -> bool {
        self.skipped > 0
    }
}

/// Drives the triage engine and ticket sink for each ticket in turn.
pub struct RetryingProcessor<'a> {
    engine: &'a dyn TriageEngine,
    sink: &'a dyn TicketSink,
    policy: RetryPolicy,
}

impl<'a> RetryingProcessor<'a> {
    pub fn new(engine: &'a dyn TriageEngine, sink: &'a dyn TicketSink, policy: RetryPolicy) -> Self {
        Self {
            engine,
            sink,
            policy,
        }
    }

    /// Processes `tickets` strictly in order, updating the run metrics once
    /// per ticket.
    pub async fn process_all(&self, tickets: &[Ticket], ctx: &mut RunContext) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        if tickets.is_empty() {
            log::info!("No tickets matched; nothing to triage");
            return outcome;
        }

        for (index, ticket) in tickets.iter().enumerate() {
            if ctx.deadline_passed() {
                let skipped = tickets.len() - index;
                log::warn!(
                    "event=deadline_exceeded elapsed_ms={} skipped={}",
                    ctx.elapsed().as_millis(),
                    skipped
                );
                ctx.metrics_mut().record_skipped(skipped);
                outcome.skipped = skipped;
                break;
            }

            let processed = self.process_ticket(ticket).await;
            if processed.state.is_success() {
                ctx.metrics_mut().record_success();
            } else {
                ctx.metrics_mut().record_failure(processed.ticket_id.clone());
            }
            outcome.tickets.push(processed);
        }

        outcome
    }

    /// Runs one ticket until it succeeds or its attempts run out.
    pub async fn process_ticket(&self, ticket: &Ticket) -> ProcessedTicket {
        let description = ticket.effective_description();
        if !ticket.has_description() {
            log::debug!("ticket={} using placeholder description", ticket.id);
        }

        let retried = retry_with_fixed_backoff(
            self.policy,
            |attempt| {
                let description = description.as_str();
                async move {
                    log::info!(
                        "event=attempt ticket={} attempt={}/{}",
                        ticket.id,
                        attempt,
                        self.policy.max_attempts()
                    );
                    self.attempt(&ticket.id, description).await
                }
            },
            |attempt, failure: &TicketFailure, will_retry| {
                log::warn!(
                    "event=attempt_failed ticket={} attempt={} kind={} retry={} error={}",
                    ticket.id,
                    attempt,
                    failure.kind(),
                    will_retry,
                    failure
                );
            },
        )
        .await;

        let state = match retried.result {
            Ok(()) => {
                log::info!(
                    "event=ticket_succeeded ticket={} attempts={}",
                    ticket.id,
                    retried.attempts
                );
                TicketState::Succeeded {
                    attempts: retried.attempts,
                }
            }
            Err(last_failure) => {
                log::error!(
                    "event=ticket_exhausted ticket={} attempts={} error={}",
                    ticket.id,
                    retried.attempts,
                    last_failure
                );
                TicketState::Exhausted {
                    attempts: retried.attempts,
                    last_failure,
                }
            }
        };

        ProcessedTicket {
            ticket_id: ticket.id.clone(),
            state,
        }
    }

    /// One triage-then-update cycle.
    async fn attempt(&self, ticket_id: &TicketId, description: &str) -> Result<(), TicketFailure> {
        let result = self.engine.generate_triage(ticket_id, description).await?;
        log::debug!(
            "ticket={} priority={} steps={}",
            ticket_id,
            result.priority,
            result.actionable_steps.len()
        );
        self.sink.apply_triage(ticket_id, &result).await
    }
}
