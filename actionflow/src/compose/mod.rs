//! Combinators that build new actions out of existing ones.
//!
//! This module provides:
//! - Sequential chaining with short-circuit on the first error
//! - Conditional branching
//! - Parallel fan-out with an indexed fan-in reducer
//! - Error recovery through `Catch` and `Finally`

mod branch;
mod parallel;
mod recovery;
mod sequential;

pub use branch::{if_else, Condition, If};
pub use parallel::{parallel, Parallel, Reducer};
pub use recovery::{catch, finally, Catch, ErrorHandler, Finally, FinallyHandler};
pub use sequential::{chain, sequential, Sequential};
