//! Retry with configurable backoff and jitter.
//!
//! Provides automatic re-invocation of failing actions with a bounded number
//! of retries, a delay schedule driven by a backoff strategy, symmetric
//! jitter, and an optional predicate that can veto a retry.

mod backoff;
mod engine;
mod options;

pub use backoff::{jittered_delay, Backoff};
pub use engine::{retry, Retry, RetryDecision};
pub use options::{BackoffKind, RetryConfig, RetryOptions, RetryPredicate};
