//! Conditional branching.

use crate::action::{noop, Action, ActionRef};
use crate::errors::{ActionError, ActionResult};
use async_trait::async_trait;
use std::sync::Arc;

/// A fallible predicate over an action input.
pub type Condition<T> = Arc<dyn Fn(&T) -> ActionResult<bool> + Send + Sync>;

/// Runs exactly one of two actions depending on a predicate.
pub struct If<T> {
    condition: Condition<T>,
    if_true: ActionRef<T>,
    if_false: ActionRef<T>,
}

impl<T> If<T>
where
    T: Send + 'static,
{
    /// Creates a new conditional.
    pub fn new<C>(condition: C, if_true: ActionRef<T>, if_false: ActionRef<T>) -> Self
    where
        C: Fn(&T) -> ActionResult<bool> + Send + Sync + 'static,
    {
        Self {
            condition: Arc::new(condition),
            if_true,
            if_false,
        }
    }

    /// Builds a conditional from optional parts.
    ///
    /// If any part is missing the whole conditional degrades to [`noop`].
    pub fn from_parts(
        condition: Option<Condition<T>>,
        if_true: Option<ActionRef<T>>,
        if_false: Option<ActionRef<T>>,
    ) -> ActionRef<T>
    where
        T: Default,
    {
        match (condition, if_true, if_false) {
            (Some(condition), Some(if_true), Some(if_false)) => Arc::new(Self {
                condition,
                if_true,
                if_false,
            }),
            _ => noop(),
        }
    }
}

#[async_trait]
impl<T> Action<T> for If<T>
where
    T: Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        let branch = match (self.condition)(&input) {
            Ok(true) => &self.if_true,
            Ok(false) => &self.if_false,
            Err(err) => {
                tracing::debug!(error = %err, "Branch condition failed");
                return Err(ActionError::condition(err));
            }
        };
        branch.run(input).await
    }
}

/// Runs `if_true` when `condition` holds, `if_false` otherwise.
pub fn if_else<T, C>(condition: C, if_true: ActionRef<T>, if_false: ActionRef<T>) -> ActionRef<T>
where
    T: Send + 'static,
    C: Fn(&T) -> ActionResult<bool> + Send + Sync + 'static,
{
    Arc::new(If::new(condition, if_true, if_false))
}
