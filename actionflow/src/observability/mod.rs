//! Observability utilities.

mod instrument;
mod subscriber;

pub use instrument::{Instrumented, SpanTimer};
pub use subscriber::{init_tracing, LogConfig, LogFormat};
