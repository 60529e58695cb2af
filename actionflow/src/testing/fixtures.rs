//! Small actions, predicates and reducers shared by tests and benchmarks.

use crate::action::{from_fn, ActionRef};
use crate::errors::{ActionError, ActionResult};

/// An action that adds `n` to its input.
#[must_use]
pub fn add(n: i64) -> ActionRef<i64> {
    from_fn(move |x: i64| Ok(x + n))
}

/// An action that always fails with `message`.
#[must_use]
pub fn fail_with<T>(message: impl Into<String>) -> ActionRef<T>
where
    T: Send + 'static,
{
    let message = message.into();
    from_fn(move |_: T| Err(ActionError::failed(message.clone())))
}

/// Holds when the input is odd.
pub fn is_odd(x: &i64) -> ActionResult<bool> {
    Ok(x % 2 != 0)
}

/// Sums every branch output, failing with the first branch error.
pub fn sum_reducer(results: Vec<ActionResult<i64>>) -> ActionResult<i64> {
    results.into_iter().sum()
}
