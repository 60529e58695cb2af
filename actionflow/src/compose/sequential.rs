//! Sequential composition.

use crate::action::{noop, Action, ActionRef};
use crate::errors::ActionResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Runs actions one after another, feeding each output into the next action.
///
/// The first error stops the chain; later actions never run.
pub struct Sequential<T> {
    actions: Vec<ActionRef<T>>,
}

impl<T> Sequential<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(actions: Vec<ActionRef<T>>) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl<T> Action<T> for Sequential<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        let mut value = input;
        for action in &self.actions {
            value = action.run(value).await?;
        }
        Ok(value)
    }
}

/// Chains `actions` into a single action.
///
/// No actions yields [`noop`]; a single action is returned as-is.
pub fn sequential<T, I>(actions: I) -> ActionRef<T>
where
    T: Default + Send + 'static,
    I: IntoIterator<Item = ActionRef<T>>,
{
    let mut actions: Vec<ActionRef<T>> = actions.into_iter().collect();
    match actions.len() {
        0 => noop(),
        1 => actions.remove(0),
        _ => Arc::new(Sequential::new(actions)),
    }
}

/// Chains two optional actions.
///
/// A missing action is skipped; if both are missing the result is [`noop`].
pub fn chain<T>(first: Option<ActionRef<T>>, next: Option<ActionRef<T>>) -> ActionRef<T>
where
    T: Default + Send + 'static,
{
    match (first, next) {
        (Some(first), Some(next)) => Arc::new(Sequential::new(vec![first, next])),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => noop(),
    }
}
