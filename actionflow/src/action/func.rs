//! Closure-backed actions.

use super::{Action, ActionRef};
use crate::errors::ActionResult;
use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

/// An action backed by a synchronous function.
pub struct FnAction<F> {
    func: F,
}

impl<F> FnAction<F> {
    /// Creates a new function-based action.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Debug for FnAction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAction").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T, F> Action<T> for FnAction<F>
where
    T: Send + 'static,
    F: Fn(T) -> ActionResult<T> + Send + Sync,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        (self.func)(input)
    }
}

/// An action backed by an async function.
pub struct AsyncFnAction<F> {
    func: F,
}

impl<F> AsyncFnAction<F> {
    /// Creates a new async function-based action.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Debug for AsyncFnAction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncFnAction").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T, F, Fut> Action<T> for AsyncFnAction<F>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult<T>> + Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        (self.func)(input).await
    }
}

/// An action that ignores its input and yields `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOp;

#[async_trait]
impl<T> Action<T> for NoOp
where
    T: Default + Send + 'static,
{
    async fn run(&self, _input: T) -> ActionResult<T> {
        Ok(T::default())
    }
}

/// Lifts a typed function into a shared action.
pub fn from_fn<T, F>(func: F) -> ActionRef<T>
where
    T: Send + 'static,
    F: Fn(T) -> ActionResult<T> + Send + Sync + 'static,
{
    Arc::new(FnAction::new(func))
}

/// Lifts an async function into a shared action.
pub fn from_async_fn<T, F, Fut>(func: F) -> ActionRef<T>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ActionResult<T>> + Send + 'static,
{
    Arc::new(AsyncFnAction::new(func))
}

/// Returns an action that always succeeds with `T::default()`.
pub fn noop<T>() -> ActionRef<T>
where
    T: Default + Send + 'static,
{
    Arc::new(NoOp)
}
