//! Span instrumentation for actions.

use crate::action::{Action, ActionRef};
use crate::errors::ActionResult;
use async_trait::async_trait;
use std::time::Instant;

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: String,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Runs an action inside a named `action` span and logs its outcome.
///
/// The wrapped action's result is returned unchanged.
pub struct Instrumented<T> {
    name: String,
    action: ActionRef<T>,
}

impl<T> Instrumented<T>
where
    T: Send + 'static,
{
    /// Creates a new instrumented action.
    pub fn new(name: impl Into<String>, action: ActionRef<T>) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl<T> Action<T> for Instrumented<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        let span = tracing::debug_span!("action", name = %self.name);
        let timer = SpanTimer::start(self.name.as_str());

        let result =
            tracing::Instrument::instrument(self.action.run(input), span.clone()).await;

        let duration_ms = timer.elapsed_ms();
        span.in_scope(|| match &result {
            Ok(_) => tracing::debug!(action = timer.name(), duration_ms, "Action completed"),
            Err(err) => tracing::warn!(
                action = timer.name(),
                duration_ms,
                error_kind = err.kind(),
                error = %err,
                "Action failed"
            ),
        });
        result
    }
}
