//! # Actionflow
//!
//! Composable actions for building data-processing pipelines.
//!
//! An action takes one input value and returns an output or an error. Every
//! combinator takes actions and returns a new action, so an entire pipeline is
//! itself an action that can be nested inside a larger one:
//!
//! - **Sequential**: feed each output into the next action, stop at the first error
//! - **If**: run one of two actions depending on a predicate
//! - **Parallel**: run every branch on the same input and reduce the results
//! - **Catch / Finally**: recover from or post-process a result
//! - **Retry**: re-run a failing action with backoff and jitter
//!
//! ## Quick Start
//!
//! ```rust
//! use actionflow::prelude::*;
//! use actionflow::testing::{add, is_odd, sum_reducer};
//!
//! let pipeline = Definition::new("example")
//!     .next(add(1))
//!     .next(parallel(sum_reducer, vec![add(1), add(2)]))
//!     .next(if_else(is_odd, add(2), noop()));
//!
//! assert_eq!(pipeline.run_blocking(1).unwrap(), 9);
//! ```
//!
//! ## Limitations
//!
//! - Every action in a composed pipeline maps a `T` to a `T`. Steps that
//!   change the value's type go through [`value::typed`] over
//!   [`serde_json::Value`], which checks each conversion at run time.
//! - A failing action returns only its error. Any output it produced before
//!   failing is dropped, so `Catch`, `Finally` and retry predicates see
//!   the [`ActionError`] alone.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod action;
pub mod compose;
pub mod definition;
pub mod errors;
pub mod observability;
pub mod retry;
pub mod testing;
pub mod value;

pub use action::{Action, ActionExt, ActionRef};
pub use definition::Definition;
pub use errors::{ActionError, ActionResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{from_async_fn, from_fn, noop, Action, ActionExt, ActionRef};
    pub use crate::compose::{
        catch, chain, finally, if_else, parallel, sequential, Catch, Finally, If, Parallel,
        Sequential,
    };
    pub use crate::definition::Definition;
    pub use crate::errors::{ActionError, ActionResult};
    pub use crate::observability::{init_tracing, Instrumented, LogConfig, LogFormat};
    pub use crate::retry::{retry, Backoff, Retry, RetryConfig, RetryOptions};
}
