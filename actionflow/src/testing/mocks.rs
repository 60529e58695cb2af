//! Mock actions for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::action::{Action, ActionRef};
use crate::errors::{ActionError, ActionResult};

/// Wraps an action and counts how often it runs.
pub struct CountingAction<T> {
    inner: ActionRef<T>,
    call_count: Mutex<usize>,
}

impl<T> CountingAction<T>
where
    T: Send + 'static,
{
    /// Creates a new counting wrapper.
    #[must_use]
    pub fn new(inner: ActionRef<T>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            call_count: Mutex::new(0),
        })
    }

    /// Returns a handle that can be composed while the counter stays observable.
    #[must_use]
    pub fn action(self: &Arc<Self>) -> ActionRef<T> {
        Arc::clone(self) as ActionRef<T>
    }

    /// Returns the number of times the action was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.call_count.lock()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        *self.call_count.lock() = 0;
    }
}

#[async_trait]
impl<T> Action<T> for CountingAction<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        *self.call_count.lock() += 1;
        self.inner.run(input).await
    }
}

/// Fails a fixed number of times, then delegates to the inner action.
pub struct FlakyAction<T> {
    failures: usize,
    inner: ActionRef<T>,
    call_count: Mutex<usize>,
}

impl<T> FlakyAction<T>
where
    T: Send + 'static,
{
    /// Creates an action whose first `failures` calls fail.
    #[must_use]
    pub fn new(failures: usize, inner: ActionRef<T>) -> Arc<Self> {
        Arc::new(Self {
            failures,
            inner,
            call_count: Mutex::new(0),
        })
    }

    /// Returns a composable handle.
    #[must_use]
    pub fn action(self: &Arc<Self>) -> ActionRef<T> {
        Arc::clone(self) as ActionRef<T>
    }

    /// Returns the number of times the action was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.call_count.lock()
    }
}

#[async_trait]
impl<T> Action<T> for FlakyAction<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        let call = {
            let mut count = self.call_count.lock();
            *count += 1;
            *count
        };

        if call <= self.failures {
            return Err(ActionError::failed(format!("transient failure {call}")));
        }
        self.inner.run(input).await
    }
}

/// Sleeps before delegating to the inner action.
pub struct DelayedAction<T> {
    delay: Duration,
    inner: ActionRef<T>,
}

impl<T> DelayedAction<T>
where
    T: Send + 'static,
{
    /// Creates a new delayed action.
    #[must_use]
    pub fn new(delay: Duration, inner: ActionRef<T>) -> Self {
        Self { delay, inner }
    }
}

#[async_trait]
impl<T> Action<T> for DelayedAction<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        tokio::time::sleep(self.delay).await;
        self.inner.run(input).await
    }
}

/// Records every input it sees, then delegates.
pub struct RecordingAction<T> {
    inner: ActionRef<T>,
    inputs: Mutex<Vec<T>>,
}

impl<T> RecordingAction<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a new recording wrapper.
    #[must_use]
    pub fn new(inner: ActionRef<T>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            inputs: Mutex::new(Vec::new()),
        })
    }

    /// Returns a composable handle.
    #[must_use]
    pub fn action(self: &Arc<Self>) -> ActionRef<T> {
        Arc::clone(self) as ActionRef<T>
    }

    /// Returns all recorded inputs.
    #[must_use]
    pub fn inputs(&self) -> Vec<T> {
        self.inputs.lock().clone()
    }
}

#[async_trait]
impl<T> Action<T> for RecordingAction<T>
where
    T: Clone + Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        self.inputs.lock().push(input.clone());
        self.inner.run(input).await
    }
}
