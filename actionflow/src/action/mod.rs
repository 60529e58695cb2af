//! The action trait and its extension methods.
//!
//! Actions are the fundamental units of work in an actionflow pipeline. Every
//! combinator consumes actions and produces a new one, so a whole pipeline is
//! itself a single action.

mod func;

pub use func::{from_async_fn, from_fn, noop, AsyncFnAction, FnAction, NoOp};

use crate::compose::{Catch, Finally, Sequential};
use crate::errors::{ActionError, ActionResult};
use crate::observability::Instrumented;
use crate::retry::{Retry, RetryOptions};
use async_trait::async_trait;
use std::sync::Arc;

/// A single-input, single-output, fallible unit of work.
///
/// Implementations must not hold per-invocation state: the same action may be
/// run many times, including concurrently from a parallel stage.
#[async_trait]
pub trait Action<T>: Send + Sync {
    /// Runs the action.
    ///
    /// # Arguments
    ///
    /// * `input` - The value produced by the previous action
    ///
    /// # Returns
    ///
    /// The output handed to the next action, or the error that stops the chain.
    async fn run(&self, input: T) -> ActionResult<T>;
}

/// A shared, type-erased action.
pub type ActionRef<T> = Arc<dyn Action<T>>;

#[async_trait]
impl<T, A> Action<T> for Arc<A>
where
    T: Send + 'static,
    A: Action<T> + ?Sized,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        (**self).run(input).await
    }
}

/// Fluent combinators available on every concrete action.
pub trait ActionExt<T>: Action<T> + Sized + 'static
where
    T: Send + 'static,
{
    /// Erases the concrete type.
    fn boxed(self) -> ActionRef<T> {
        Arc::new(self)
    }

    /// Runs `next` with this action's output.
    fn then(self, next: impl Action<T> + 'static) -> Sequential<T> {
        let next: ActionRef<T> = Arc::new(next);
        Sequential::new(vec![self.boxed(), next])
    }

    /// Replaces a failure with the handler's result.
    fn catch<H>(self, handle: H) -> Catch<T>
    where
        H: Fn(ActionError) -> ActionResult<T> + Send + Sync + 'static,
    {
        Catch::new(self.boxed(), handle)
    }

    /// Passes every result through `finally`.
    fn finally<H>(self, finally: H) -> Finally<T>
    where
        H: Fn(ActionResult<T>) -> ActionResult<T> + Send + Sync + 'static,
    {
        Finally::new(self.boxed(), finally)
    }

    /// Re-runs the action on failure according to `options`.
    fn retry(self, options: RetryOptions) -> Retry<T>
    where
        T: Clone,
    {
        Retry::new(self.boxed(), options)
    }

    /// Wraps the action in a named tracing span.
    fn instrument(self, name: impl Into<String>) -> Instrumented<T> {
        Instrumented::new(name, self.boxed())
    }
}

impl<T, A> ActionExt<T> for A
where
    T: Send + 'static,
    A: Action<T> + 'static,
{
}
