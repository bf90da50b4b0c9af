//! Error types used by the executor and by tasks.
//!
//! This module defines two enums:
//!
//! - [`TaskError`] - the error side of a single attempt (and of the final [`Outcome`](crate::Outcome)).
//! - [`ConfigError`] - an executor configuration that cannot be run.
//!
//! Both provide `as_label` for logs. [`TaskError`] also offers classification helpers
//! such as [`TaskError::is_timeout`] that conditional retry predicates can lean on.

use std::time::Duration;
use thiserror::Error;

/// Type-erased error returned by task bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by task execution.
///
/// `Fail`, `Timeout` and `Panicked` are attempt errors: they are handed to the
/// [`RetryStrategy`](crate::RetryStrategy), which decides whether another attempt runs.
/// `Canceled` caused by the parent token is terminal and never reaches a strategy; a task
/// that returns `Canceled` on its own is treated like any other attempt error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task returned an error.
    ///
    /// Displays the inner error verbatim.
    #[error("{error}")]
    Fail {
        /// The underlying error.
        error: BoxError,
    },

    /// The attempt exceeded its per-attempt timeout.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The task panicked while running; the panic was caught by the executor.
    #[error("task panicked: {message}")]
    Panicked {
        /// Panic payload rendered as text (`"unknown"` for non-string payloads).
        message: String,
    },

    /// The parent token was cancelled.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Wraps any error (or message) as an attempt failure.
    ///
    /// # Example
    /// ```
    /// use retryvisor::TaskError;
    ///
    /// let err = TaskError::fail("upstream returned KO");
    /// assert_eq!(err.to_string(), "upstream returned KO");
    /// ```
    pub fn fail(error: impl Into<BoxError>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use retryvisor::TaskError;
    /// use std::time::Duration;
    ///
    /// let err = TaskError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "task_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Timeout { .. } => "task_timeout",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// `true` if the attempt ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TaskError::Timeout { .. })
    }

    /// `true` if the invocation was cancelled through the parent token.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}

/// # Errors produced while building an executor.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The retry strategy allows zero attempts, so the task would never run.
    #[error("retry strategy must allow at least one attempt")]
    ZeroMaxAttempts,

    /// A growth factor in a declarative config is negative or not finite.
    #[error("invalid multiplier {multiplier}: must be finite and non-negative")]
    InvalidMultiplier {
        /// The rejected value.
        multiplier: f64,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::ZeroMaxAttempts => "config_zero_max_attempts",
            ConfigError::InvalidMultiplier { .. } => "config_invalid_multiplier",
        }
    }
}
