//! Bounded retry with exponential backoff for a single delivery.
//!
//! The loop owns the attempt counter and delay state for one delivery and
//! drives it to a terminal outcome: accepted, or exhausted. Failure detail
//! never escapes past the returned boolean; causes go to the diagnostics
//! sink.

use crate::diagnostics::Diagnostics;
use crate::notification::transport::Transport;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Attempt budget for one destination, fixed for its lifetime.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Total transport invocations per delivery. The initial attempt is
    /// unconditional, so `max_attempts = 0` ("retries disabled") still
    /// performs exactly one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before re-entering the loop after the given failed attempt:
    /// `2^attempt` seconds, uncapped.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        Duration::from_secs(2_u64.pow(attempt))
    }
}

/// Drives `transport` until it accepts the payload or the attempt budget is
/// exhausted. Returns `true` on acceptance.
pub async fn deliver_with_retry(
    transport: &dyn Transport,
    payload: &str,
    policy: &RetryPolicy,
    diagnostics: &dyn Diagnostics,
) -> bool {
    let attempts = policy.attempts();

    for attempt in 1..=attempts {
        match transport.attempt(payload).await {
            Ok(()) => {
                debug!(attempt, "payload accepted");
                return true;
            }
            Err(e) => {
                diagnostics.warn(&format!(
                    "delivery attempt {attempt}/{attempts} failed: {e}"
                ));
                if attempt < attempts {
                    let backoff = policy.backoff_after(attempt);
                    debug!(backoff_s = backoff.as_secs(), "retrying after backoff");
                    sleep(backoff).await;
                }
            }
        }
    }

    diagnostics.error(&format!("delivery failed after {attempts} attempts"));
    false
}
