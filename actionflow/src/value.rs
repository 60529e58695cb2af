//! Dynamic value pipelines.
//!
//! A pipeline over [`Value`] can mix steps that each expect a different
//! concrete type. The adapters here check every conversion at run time and
//! report a wrong shape as [`ActionError::TypeMismatch`].

use crate::action::{from_fn, ActionRef};
use crate::errors::{ActionError, ActionResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use serde_json::Value;

/// Reads `value` as an `A`.
pub fn extract<A>(value: &Value) -> ActionResult<A>
where
    A: DeserializeOwned,
{
    A::deserialize(value).map_err(|err| ActionError::type_mismatch::<A>(err.to_string()))
}

/// Converts `output` into a [`Value`].
pub fn to_value<B>(output: B) -> ActionResult<Value>
where
    B: Serialize,
{
    serde_json::to_value(output).map_err(|err| ActionError::type_mismatch::<Value>(err.to_string()))
}

/// Lifts a typed function into an action over [`Value`].
///
/// The input is read as an `A` before `func` runs; its output is written back
/// as a [`Value`].
///
/// # Example
///
/// ```rust
/// use actionflow::value::{typed, Value};
/// use actionflow::{Action, ActionResult};
///
/// # async fn example() -> ActionResult<()> {
/// let double = typed(|x: i64| -> ActionResult<i64> { Ok(x * 2) });
/// assert_eq!(double.run(Value::from(21)).await?, Value::from(42));
/// # Ok(())
/// # }
/// ```
pub fn typed<A, B, E, F>(func: F) -> ActionRef<Value>
where
    A: DeserializeOwned + 'static,
    B: Serialize + 'static,
    E: Into<ActionError> + 'static,
    F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
{
    from_fn(move |input: Value| {
        let input = extract::<A>(&input)?;
        let output = func(input).map_err(Into::<ActionError>::into)?;
        to_value(output)
    })
}

/// Lifts a typed predicate into a condition over [`Value`].
pub fn typed_condition<A, F>(predicate: F) -> impl Fn(&Value) -> ActionResult<bool> + Send + Sync + 'static
where
    A: DeserializeOwned + 'static,
    F: Fn(&A) -> ActionResult<bool> + Send + Sync + 'static,
{
    move |value: &Value| {
        let value = extract::<A>(value)?;
        predicate(&value)
    }
}
