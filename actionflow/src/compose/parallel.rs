//! Parallel fan-out with an indexed fan-in.

use crate::action::{Action, ActionRef};
use crate::errors::{ActionError, ActionResult};
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use std::sync::Arc;

/// Folds the results of every parallel branch into one result.
///
/// `results[i]` is always the outcome of the i-th branch.
pub type Reducer<T> = Arc<dyn Fn(Vec<ActionResult<T>>) -> ActionResult<T> + Send + Sync>;

/// Runs every branch concurrently on the same input, then reduces the results.
///
/// Inside a Tokio runtime each branch is spawned as its own task. Without one,
/// the branches are polled concurrently on the caller's task instead.
///
/// The stage is a barrier: it waits for every branch, successful or not,
/// before calling the reducer. A failing branch never cancels its siblings;
/// the reducer alone decides what a branch error means for the stage.
pub struct Parallel<T> {
    reduce: Reducer<T>,
    actions: Vec<ActionRef<T>>,
}

impl<T> Parallel<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a new parallel stage.
    pub fn new<R>(reduce: R, actions: Vec<ActionRef<T>>) -> Self
    where
        R: Fn(Vec<ActionResult<T>>) -> ActionResult<T> + Send + Sync + 'static,
    {
        Self {
            reduce: Arc::new(reduce),
            actions,
        }
    }

    /// Returns the number of branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if the stage has no branches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Polls every branch concurrently on the current task.
    ///
    /// Used when no Tokio runtime is available to spawn onto. A panicking
    /// branch unwinds through the stage here.
    async fn join_inline(&self, input: T) -> Vec<ActionResult<T>> {
        tracing::trace!(branches = self.len(), "Parallel branches polled inline");
        join_all(self.actions.iter().map(|action| action.run(input.clone()))).await
    }

    /// Spawns one task per branch and collects their results by index.
    async fn fan_out(&self, input: T) -> Vec<ActionResult<T>> {
        let count = self.len();
        let slots: Arc<Mutex<Vec<Option<ActionResult<T>>>>> =
            Arc::new(Mutex::new((0..count).map(|_| None).collect()));

        let handles: Vec<_> = self
            .actions
            .iter()
            .enumerate()
            .map(|(index, action)| {
                let action = Arc::clone(action);
                let slots = Arc::clone(&slots);
                let input = input.clone();
                tokio::spawn(async move {
                    let result = action.run(input).await;
                    slots.lock()[index] = Some(result);
                })
            })
            .collect();
        drop(input);

        tracing::trace!(branches = count, "Parallel branches spawned");
        let joined = join_all(handles).await;
        let filled = std::mem::take(&mut *slots.lock());

        filled
            .into_iter()
            .zip(joined)
            .enumerate()
            .map(|(index, (slot, join))| match slot {
                Some(result) => result,
                None => {
                    let reason = join.err().map_or_else(
                        || "branch finished without a result".to_string(),
                        |err| err.to_string(),
                    );
                    tracing::warn!(index, reason = %reason, "Parallel branch did not complete");
                    Err(ActionError::Join { index, reason })
                }
            })
            .collect()
    }
}

#[async_trait]
impl<T> Action<T> for Parallel<T>
where
    T: Clone + Send + 'static,
{
    async fn run(&self, input: T) -> ActionResult<T> {
        if self.is_empty() {
            return (self.reduce)(Vec::new());
        }

        let results = if tokio::runtime::Handle::try_current().is_ok() {
            self.fan_out(input).await
        } else {
            self.join_inline(input).await
        };
        tracing::trace!(branches = results.len(), "Parallel branches joined");
        (self.reduce)(results)
    }
}

/// Runs `actions` concurrently and folds their results with `reduce`.
pub fn parallel<T, R>(reduce: R, actions: Vec<ActionRef<T>>) -> ActionRef<T>
where
    T: Clone + Send + 'static,
    R: Fn(Vec<ActionResult<T>>) -> ActionResult<T> + Send + Sync + 'static,
{
    Arc::new(Parallel::new(reduce, actions))
}
