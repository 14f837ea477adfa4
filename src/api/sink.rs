// src/api/sink.rs
use crate::error::TicketFailure;
use crate::model::TriageResult;
use crate::pipeline::TicketSink;
use crate::types::TicketId;
use std::time::Duration;

/// Stands in for a ticket write: waits, logs the payload, reports success.
#[derive(Debug, Clone)]
pub struct SimulatedTicketSink {
    delay: Duration,
}

impl SimulatedTicketSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTicketSink {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::constants::SIMULATED_UPDATE_DELAY_MS,
        ))
    }
}

#[async_trait::async_trait]
impl TicketSink for SimulatedTicketSink {
    async fn apply_triage(&self, ticket_id: &TicketId, result: &TriageResult) -> Result<(), TicketFailure> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let payload = serde_json::to_string(result)
            .map_err(|e| TicketFailure::Update(format!("could not encode triage: {}", e)))?;
        log::info!(
            "event=ticket_updated ticket={} mode=simulated priority={} payload={}",
            ticket_id,
            result.priority,
            payload
        );
        Ok(())
    }
}
