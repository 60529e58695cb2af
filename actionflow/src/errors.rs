//! Error types for the actionflow engine.
//!
//! Every action in a pipeline fails with an [`ActionError`]. Combinators pass
//! errors through untouched unless they exist to handle them (`Catch`,
//! `Finally`, and the retry predicate).

use std::sync::Arc;
use thiserror::Error;

/// Outcome of a single action invocation.
pub type ActionResult<T> = Result<T, ActionError>;

/// The error type shared by every action.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    /// A dynamically typed value did not have the shape an adapter expected.
    #[error("Type mismatch: expected `{expected}`: {reason}")]
    TypeMismatch {
        /// Name of the type the adapter tried to produce.
        expected: &'static str,
        /// Why the conversion failed.
        reason: String,
    },

    /// A branch predicate failed before either branch ran.
    #[error("Condition failed: {0}")]
    Condition(#[source] Box<ActionError>),

    /// A caller-defined failure returned by a leaf action.
    #[error("{message}")]
    Failed {
        /// The failure message.
        message: String,
    },

    /// A foreign error raised inside a leaf action.
    #[error("{0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),

    /// A parallel branch task did not run to completion.
    #[error("Parallel branch {index} did not complete: {reason}")]
    Join {
        /// Position of the branch in the parallel stage.
        index: usize,
        /// The join failure, usually a panic message.
        reason: String,
    },

    /// No async runtime could be created for a blocking run.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ActionError {
    /// Creates a caller-defined failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Wraps a foreign error.
    #[must_use]
    pub fn source<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Arc::new(error))
    }

    /// Creates a type mismatch error for the target type `T`.
    #[must_use]
    pub fn type_mismatch<T>(reason: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Wraps a predicate failure.
    #[must_use]
    pub fn condition(cause: Self) -> Self {
        Self::Condition(Box::new(cause))
    }

    /// Returns a short, stable name for the variant, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::Condition(_) => "condition",
            Self::Failed { .. } => "failed",
            Self::Source(_) => "source",
            Self::Join { .. } => "join",
            Self::Runtime(_) => "runtime",
        }
    }

    /// Returns true if this is a type mismatch.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns true if a branch predicate failed.
    #[must_use]
    pub fn is_condition(&self) -> bool {
        matches!(self, Self::Condition(_))
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        let boxed: Box<dyn std::error::Error + Send + Sync> = err.into();
        Self::Source(Arc::from(boxed))
    }
}

impl From<std::io::Error> for ActionError {
    fn from(err: std::io::Error) -> Self {
        Self::source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_display() {
        let err = ActionError::failed("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.kind(), "failed");
    }

    #[test]
    fn test_type_mismatch_names_target() {
        let err = ActionError::type_mismatch::<i64>("invalid type: string");
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("i64"));
    }

    #[test]
    fn test_condition_keeps_cause() {
        let err = ActionError::condition(ActionError::failed("bad predicate"));
        assert!(err.is_condition());
        assert_eq!(err.to_string(), "Condition failed: bad predicate");

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("bad predicate"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: ActionError = anyhow::anyhow!("upstream unavailable").into();
        assert_eq!(err.kind(), "source");
        assert_eq!(err.to_string(), "upstream unavailable");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing input");
        let err = ActionError::from(io);
        assert_eq!(err.kind(), "source");
        assert!(err.to_string().contains("missing input"));
    }

    #[test]
    fn test_join_display() {
        let err = ActionError::Join {
            index: 2,
            reason: "panicked".to_string(),
        };
        assert_eq!(err.to_string(), "Parallel branch 2 did not complete: panicked");
    }
}
