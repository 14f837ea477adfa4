// src/error_recovery.rs
//! Bounded retry with a fixed pause between attempts.

use std::future::Future;
use std::time::Duration;

/// How many times an operation may be repeated and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Total attempts the policy permits.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether a failure on `attempt` (1-based) earns another try.
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_MAX_RETRIES,
            crate::constants::RETRY_BACKOFF,
        )
    }
}

/// Final result of a retried operation together with the attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOutcome<T, E> {
    pub result: Result<T, E>,
    pub attempts: u32,
}

/// Runs `operation` until it succeeds or the policy is exhausted.
///
/// `operation` receives the 1-based attempt number. `on_failure` sees every
/// failed attempt before the pause, including the last one. No pause follows
/// the final failure.
pub async fn retry_with_fixed_backoff<F, Fut, T, E, L>(
    policy: RetryPolicy,
    mut operation: F,
    mut on_failure: L,
) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    L: FnMut(u32, &E, bool),
{
    let mut attempt = 1u32;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryOutcome {
                    result: Ok(value),
                    attempts: attempt,
                }
            }
            Err(error) => {
                let will_retry = policy.allows_retry_after(attempt);
                on_failure(attempt, &error, will_retry);

                if !will_retry {
                    return RetryOutcome {
                        result: Err(error),
                        attempts: attempt,
                    };
                }

                if !policy.backoff.is_zero() {
                    tokio::time::sleep(policy.backoff).await;
                }
                attempt += 1;
            }
        }
    }
}
