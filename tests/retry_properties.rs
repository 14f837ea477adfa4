// tests/retry_properties.rs
//! Attempt counting of the retrying processor.

mod common;

use common::{ticket, RecordingSink, Script, ScriptedEngine};
use psa_triage::{RetryPolicy, RetryingProcessor, TicketFailure, TicketState};
use std::time::Duration;

fn policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::ZERO)
}

#[tokio::test]
async fn always_failing_ticket_gets_max_retries_plus_one_attempts() {
    for max_retries in 0..=4 {
        let engine = ScriptedEngine::new().with("TICKET-1", Script::AlwaysFail);
        let sink = RecordingSink::default();
        let processor = RetryingProcessor::new(&engine, &sink, policy(max_retries));

        let processed = processor.process_ticket(&ticket("TICKET-1", "disk full")).await;

        assert_eq!(engine.calls_for("TICKET-1").len() as u32, max_retries + 1);
        assert_eq!(
            processed.state,
            TicketState::Exhausted {
                attempts: max_retries + 1,
                last_failure: TicketFailure::TriageParse("response was not JSON".to_string()),
            }
        );
        assert!(sink.updated.lock().is_empty());
    }
}

#[tokio::test]
async fn success_on_attempt_k_stops_retrying() {
    let max_retries = 3;
    for k in 1..=max_retries + 1 {
        let engine = ScriptedEngine::new().with("TICKET-1", Script::FailTimes(k - 1));
        let sink = RecordingSink::default();
        let processor = RetryingProcessor::new(&engine, &sink, policy(max_retries));

        let processed = processor.process_ticket(&ticket("TICKET-1", "disk full")).await;

        assert_eq!(processed.state, TicketState::Succeeded { attempts: k });
        assert_eq!(engine.calls_for("TICKET-1").len() as u32, k);
        assert_eq!(sink.updated.lock().len(), 1);
    }
}

#[tokio::test]
async fn backoff_separates_attempts() {
    let engine = ScriptedEngine::new().with("TICKET-1", Script::FailTimes(1));
    let sink = RecordingSink::default();
    let processor = RetryingProcessor::new(&engine, &sink, RetryPolicy::new(1, Duration::from_millis(50)));

    let started = std::time::Instant::now();
    let processed = processor.process_ticket(&ticket("TICKET-1", "disk full")).await;

    assert_eq!(processed.state, TicketState::Succeeded { attempts: 2 });
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn no_pause_after_the_final_failure() {
    let engine = ScriptedEngine::new().with("TICKET-1", Script::AlwaysFail);
    let sink = RecordingSink::default();
    let processor = RetryingProcessor::new(&engine, &sink, RetryPolicy::new(0, Duration::from_secs(30)));

    let started = std::time::Instant::now();
    processor.process_ticket(&ticket("TICKET-1", "disk full")).await;

    assert!(started.elapsed() < Duration::from_secs(5));
}
