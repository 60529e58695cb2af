//! Retry options and their serializable configuration.

use super::backoff::Backoff;
use super::engine::RetryDecision;
use crate::errors::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Decides whether a failed attempt may be retried.
pub type RetryPredicate = Arc<dyn Fn(&ActionError) -> bool + Send + Sync>;

/// Options for one retry-wrapped action.
#[derive(Clone)]
pub struct RetryOptions {
    /// Maximum number of retries after the initial attempt. Zero means a single attempt.
    pub max_retries: u32,
    /// Delay between the first failure and the first retry.
    pub initial_delay: Duration,
    /// Upper bound for the delay. Zero means unbounded.
    pub max_delay: Duration,
    /// Maximum random deviation added to or removed from each delay.
    pub jitter: Duration,
    /// Optional veto over retrying a given error. Absent means every error is retried.
    pub should_retry: Option<RetryPredicate>,
    /// Delay schedule between retries. Absent means the delay stays constant.
    pub backoff: Option<Backoff>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(30),
            jitter: Duration::from_millis(50),
            should_retry: None,
            backoff: Some(Backoff::Exponential),
        }
    }
}

impl RetryOptions {
    /// Creates the default retry policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the initial delay.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the jitter.
    #[must_use]
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the backoff strategy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Keeps the delay constant between retries.
    #[must_use]
    pub fn without_backoff(mut self) -> Self {
        self.backoff = None;
        self
    }

    /// Sets the retry predicate.
    #[must_use]
    pub fn with_should_retry<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ActionError) -> bool + Send + Sync + 'static,
    {
        self.should_retry = Some(Arc::new(predicate));
        self
    }

    /// Decides what to do after the attempt numbered `attempt` failed with `error`.
    ///
    /// Attempt 0 is the initial try.
    #[must_use]
    pub fn decide(&self, attempt: u32, error: &ActionError) -> RetryDecision {
        if attempt >= self.max_retries {
            return RetryDecision::Exhausted;
        }
        match &self.should_retry {
            Some(predicate) if !predicate(error) => RetryDecision::Vetoed,
            _ => RetryDecision::Retry,
        }
    }

    /// Returns the delay to use after `delay`, capped at `max_delay`.
    #[must_use]
    pub fn next_delay(&self, delay: Duration) -> Duration {
        let next = self
            .backoff
            .as_ref()
            .map_or(delay, |backoff| backoff.next_delay(delay));

        if !self.max_delay.is_zero() && next > self.max_delay {
            self.max_delay
        } else {
            next
        }
    }
}

impl fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("max_delay", &self.max_delay)
            .field("jitter", &self.jitter)
            .field("should_retry", &self.should_retry.is_some())
            .field("backoff", &self.backoff)
            .finish()
    }
}

/// Serializable backoff selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackoffKind {
    /// Keep the delay constant.
    Constant,
    /// Add a fixed increment after each retry.
    Linear {
        /// Increment in milliseconds.
        increment_ms: u64,
    },
    /// Double the delay after each retry.
    #[default]
    Exponential,
}

impl From<BackoffKind> for Backoff {
    fn from(kind: BackoffKind) -> Self {
        match kind {
            BackoffKind::Constant => Self::Constant,
            BackoffKind::Linear { increment_ms } => {
                Self::Linear(Duration::from_millis(increment_ms))
            }
            BackoffKind::Exponential => Self::Exponential,
        }
    }
}

/// Plain-data retry configuration, loadable from JSON.
///
/// Missing fields fall back to the default policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum retries after the initial attempt.
    pub max_retries: u32,
    /// Initial delay in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum delay cap in milliseconds. Zero means unbounded.
    pub max_delay_ms: u64,
    /// Jitter in milliseconds.
    pub jitter_ms: u64,
    /// Backoff strategy.
    pub backoff: BackoffKind,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 200,
            max_delay_ms: 30_000,
            jitter_ms: 50,
            backoff: BackoffKind::Exponential,
        }
    }
}

impl RetryConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<RetryConfig> for RetryOptions {
    fn from(config: RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter: Duration::from_millis(config.jitter_ms),
            should_retry: None,
            backoff: Some(config.backoff.into()),
        }
    }
}
