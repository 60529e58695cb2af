//! The retry loop.

use super::backoff::jittered_delay;
use super::options::RetryOptions;
use crate::action::{Action, ActionRef};
use crate::errors::ActionResult;
use async_trait::async_trait;
use std::sync::Arc;

/// What the retry loop does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep, then try again.
    Retry,
    /// No retries left.
    Exhausted,
    /// The predicate refused to retry this error.
    Vetoed,
}

/// Re-runs an action on failure, sleeping between attempts.
///
/// Each attempt receives a clone of the original input. Between attempts the
/// loop sleeps for the current delay plus jitter, then advances the delay
/// through the backoff strategy.
pub struct Retry<T> {
    action: ActionRef<T>,
    options: RetryOptions,
}

impl<T> Retry<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a new retry wrapper.
    pub fn new(action: ActionRef<T>, options: RetryOptions) -> Self {
        Self { action, options }
    }

    /// Returns the retry options.
    #[must_use]
    pub fn options(&self) -> &RetryOptions {
        &self.options
    }
}

#[async_trait]
impl<T> Action<T> for Retry<T>
where
    T: Clone + Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        let mut delay = self.options.initial_delay;
        let mut attempt = 0;

        loop {
            let err = match self.action.run(input.clone()).await {
                Ok(output) => {
                    if attempt > 0 {
                        tracing::debug!(attempt, "Action succeeded after retry");
                    }
                    return Ok(output);
                }
                Err(err) => err,
            };

            match self.options.decide(attempt, &err) {
                RetryDecision::Retry => {}
                RetryDecision::Exhausted => {
                    if self.options.max_retries > 0 {
                        tracing::warn!(
                            attempts = attempt + 1,
                            error = %err,
                            "Retries exhausted"
                        );
                    }
                    return Err(err);
                }
                RetryDecision::Vetoed => {
                    tracing::debug!(attempt, error = %err, "Retry vetoed by predicate");
                    return Err(err);
                }
            }

            let sleep_for = jittered_delay(delay, self.options.jitter);
            tracing::debug!(
                attempt = attempt + 1,
                max_retries = self.options.max_retries,
                delay_ms = u64::try_from(sleep_for.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "Retrying action"
            );
            tokio::time::sleep(sleep_for).await;

            delay = self.options.next_delay(delay);
            attempt += 1;
        }
    }
}

/// Wraps `action` in a retry loop. `None` selects the default policy.
pub fn retry<T>(action: ActionRef<T>, options: Option<RetryOptions>) -> ActionRef<T>
where
    T: Clone + Send + 'static,
{
    Arc::new(Retry::new(action, options.unwrap_or_default()))
}
