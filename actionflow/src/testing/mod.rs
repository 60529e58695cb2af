//! Testing utilities for actionflow pipelines.
//!
//! This module provides:
//! - Mock actions that count, record, delay or fail on purpose
//! - Fixture actions, predicates and reducers

mod fixtures;
mod mocks;

pub use fixtures::{add, fail_with, is_odd, sum_reducer};
pub use mocks::{CountingAction, DelayedAction, FlakyAction, RecordingAction};
