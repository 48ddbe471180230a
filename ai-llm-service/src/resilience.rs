//! Timeout and bounded retry around a [`GenerationClient`].
//!
//! Each attempt is capped by `attempt_timeout`. Transient failures (see
//! [`AiLlmError::is_transient`]) are retried up to `max_retries` times with
//! exponential backoff starting at `initial_backoff`. Permanent failures are
//! returned immediately.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    client::GenerationClient,
    envelope::GenerateContentResponse,
    error_handler::{AiLlmError, Result},
};

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Retry knobs for [`ResilientClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = single attempt).
    pub max_retries: u32,
    /// Sleep before the first retry; doubled for each following one.
    pub initial_backoff: Duration,
    /// Deadline for one attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `retry` (0-based), capped at 8s.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }
}

/// Wraps a client with per-attempt timeout and bounded retry.
pub struct ResilientClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C> ResilientClient<C>
where
    C: GenerationClient,
{
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<C> GenerationClient for ResilientClient<C>
where
    C: GenerationClient,
{
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let mut attempt: u32 = 0;
        loop {
            let outcome =
                match tokio::time::timeout(self.policy.attempt_timeout, self.inner.generate(prompt))
                    .await
                {
                    Ok(res) => res,
                    Err(_) => Err(AiLlmError::Timeout(self.policy.attempt_timeout)),
                };

            match outcome {
                Ok(resp) => {
                    if attempt > 0 {
                        debug!(attempt, model = self.inner.model(), "generation succeeded after retry");
                    }
                    return Ok(resp);
                }
                Err(err) if err.is_transient() && attempt < self.policy.max_retries => {
                    let wait = self.policy.backoff(attempt);
                    warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        backoff_ms = wait.as_millis(),
                        error = %err,
                        "transient generation failure, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}
