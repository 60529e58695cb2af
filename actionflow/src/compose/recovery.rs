//! Error recovery combinators.

use crate::action::{Action, ActionRef};
use crate::errors::{ActionError, ActionResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Handles the error of a failed action.
pub type ErrorHandler<T> = Arc<dyn Fn(ActionError) -> ActionResult<T> + Send + Sync>;

/// Observes or transforms every result of an action.
pub type FinallyHandler<T> = Arc<dyn Fn(ActionResult<T>) -> ActionResult<T> + Send + Sync>;

/// Replaces a failure with the result of a handler.
///
/// The handler is never called when the wrapped action succeeds.
pub struct Catch<T> {
    action: ActionRef<T>,
    handle: ErrorHandler<T>,
}

impl<T> Catch<T>
where
    T: Send + 'static,
{
    /// Creates a new catch combinator.
    pub fn new<H>(action: ActionRef<T>, handle: H) -> Self
    where
        H: Fn(ActionError) -> ActionResult<T> + Send + Sync + 'static,
    {
        Self {
            action,
            handle: Arc::new(handle),
        }
    }
}

#[async_trait]
impl<T> Action<T> for Catch<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        match self.action.run(input).await {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::debug!(error_kind = err.kind(), error = %err, "Handling action error");
                (self.handle)(err)
            }
        }
    }
}

/// Runs a handler after the wrapped action, whatever its outcome.
///
/// The handler's return value becomes the result, so it can swallow or
/// replace an error as well as transform a success.
pub struct Finally<T> {
    action: ActionRef<T>,
    finally: FinallyHandler<T>,
}

impl<T> Finally<T>
where
    T: Send + 'static,
{
    /// Creates a new finally combinator.
    pub fn new<H>(action: ActionRef<T>, finally: H) -> Self
    where
        H: Fn(ActionResult<T>) -> ActionResult<T> + Send + Sync + 'static,
    {
        Self {
            action,
            finally: Arc::new(finally),
        }
    }
}

#[async_trait]
impl<T> Action<T> for Finally<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        let result = self.action.run(input).await;
        (self.finally)(result)
    }
}

/// Wraps `action` so that failures are passed to `handle`.
pub fn catch<T, H>(action: ActionRef<T>, handle: H) -> ActionRef<T>
where
    T: Send + 'static,
    H: Fn(ActionError) -> ActionResult<T> + Send + Sync + 'static,
{
    Arc::new(Catch::new(action, handle))
}

/// Wraps `action` so that every result is passed to `finally`.
pub fn finally<T, H>(action: ActionRef<T>, finally: H) -> ActionRef<T>
where
    T: Send + 'static,
    H: Fn(ActionResult<T>) -> ActionResult<T> + Send + Sync + 'static,
{
    Arc::new(Finally::new(action, finally))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{add, fail_with};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_catch_passes_success_through() {
        let handled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&handled);
        let action = catch(add(1), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });

        assert_eq!(action.run(1).await.unwrap(), 2);
        assert_eq!(handled.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_catch_recovers() {
        let action = catch(fail_with::<i64>("test error"), |_| Ok(1));
        assert_eq!(action.run(1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_catch_handler_can_fail() {
        let action = catch(fail_with::<i64>("test error"), |err| {
            Err(ActionError::failed(format!("handled: {err}")))
        });
        assert_eq!(
            action.run(1).await.unwrap_err().to_string(),
            "handled: test error"
        );
    }

    #[tokio::test]
    async fn test_finally_transforms_success() {
        let action = finally(add(1), |result| result.map(|out| out + 2));
        assert_eq!(action.run(1).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_finally_swallows_error() {
        let action = finally(fail_with::<i64>("test error"), |result| result.or(Ok(7)));
        assert_eq!(action.run(1).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_finally_keeps_error() {
        let action = finally(fail_with::<i64>("test error"), |result| result);
        assert_eq!(action.run(1).await.unwrap_err().to_string(), "test error");
    }

    #[tokio::test]
    async fn test_finally_runs_once_per_invocation() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let action = finally(fail_with::<i64>("test error"), move |result| {
            counter.fetch_add(1, Ordering::SeqCst);
            result
        });

        let _ = action.run(1).await;
        let _ = action.run(2).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
