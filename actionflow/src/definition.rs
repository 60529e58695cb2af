//! Named, ordered pipelines built step by step.

use crate::action::{Action, ActionRef};
use crate::compose::sequential;
use crate::errors::{ActionError, ActionResult};
use crate::observability::Instrumented;
use std::fmt;
use std::sync::Arc;

/// An ordered list of actions that compiles into one sequential action.
///
/// # Example
///
/// ```rust
/// use actionflow::testing::add;
/// use actionflow::Definition;
///
/// let pipeline = Definition::new("increment").next(add(1)).next(add(2));
/// assert_eq!(pipeline.run_blocking(1).unwrap(), 4);
/// ```
pub struct Definition<T> {
    name: String,
    actions: Vec<ActionRef<T>>,
}

impl<T> Definition<T>
where
    T: Default + Send + 'static,
{
    /// Creates an empty definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Appends an action.
    #[must_use]
    pub fn next(mut self, action: ActionRef<T>) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends an action in place.
    pub fn push(&mut self, action: ActionRef<T>) -> &mut Self {
        self.actions.push(action);
        self
    }

    /// Returns the definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Composes the actions, in order, into a single action.
    ///
    /// The definition can keep growing after compiling; earlier compiled
    /// actions are unaffected.
    pub fn compile(&self) -> ActionRef<T> {
        let chained = sequential(self.actions.iter().cloned());
        Arc::new(Instrumented::new(self.name.clone(), chained))
    }

    /// Compiles and runs the definition.
    pub async fn run(&self, input: T) -> ActionResult<T> {
        self.compile().run(input).await
    }

    /// Runs the definition on a fresh multi-threaded runtime.
    ///
    /// Must not be called from within an async context.
    pub fn run_blocking(&self, input: T) -> ActionResult<T> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| ActionError::Runtime(err.to_string()))?;

        runtime.block_on(self.run(input))
    }
}

impl<T> Clone for Definition<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<T> fmt::Debug for Definition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}
