//! # Final outcome of one executor invocation.
//!
//! [`Outcome`] bundles the task's final `Result` with the attempt number that produced it
//! and the terminal state the attempt loop stopped in.
//!
//! ## Invariants
//! - Exactly one `Outcome` is produced per invocation.
//! - `attempt >= 1`.
//! - [`Termination::Succeeded`] ⇔ the result is `Ok`, and `attempt` is the attempt that succeeded.
//! - Otherwise `attempt` is the last attempt that was entered.

use crate::error::TaskError;

/// Terminal state of the attempt loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// An attempt returned `Ok`.
    Succeeded,
    /// The retry strategy declined another attempt or the attempt ceiling was reached.
    Exhausted,
    /// The parent token was cancelled.
    Canceled,
}

/// Final value-or-error of an invocation, with the attempt number that produced it.
#[derive(Debug)]
pub struct Outcome<V> {
    result: Result<V, TaskError>,
    attempt: u32,
    state: Termination,
}

impl<V> Outcome<V> {
    pub(crate) fn succeeded(value: V, attempt: u32) -> Self {
        Self {
            result: Ok(value),
            attempt,
            state: Termination::Succeeded,
        }
    }

    pub(crate) fn exhausted(error: TaskError, attempt: u32) -> Self {
        Self {
            result: Err(error),
            attempt,
            state: Termination::Exhausted,
        }
    }

    pub(crate) fn canceled(attempt: u32) -> Self {
        Self {
            result: Err(TaskError::Canceled),
            attempt,
            state: Termination::Canceled,
        }
    }

    /// The successful value, if any.
    pub fn value(&self) -> Option<&V> {
        self.result.as_ref().ok()
    }

    /// The final error, if any.
    pub fn error(&self) -> Option<&TaskError> {
        self.result.as_ref().err()
    }

    /// Attempt number (1-based) that produced this outcome.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Terminal state the loop stopped in.
    pub fn state(&self) -> Termination {
        self.state
    }

    /// `true` if an attempt succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Borrows the final result.
    pub fn result(&self) -> &Result<V, TaskError> {
        &self.result
    }

    /// Drops the attempt count and returns the bare result.
    pub fn into_result(self) -> Result<V, TaskError> {
        self.result
    }

    /// Splits into `(result, attempt)`.
    pub fn into_parts(self) -> (Result<V, TaskError>, u32) {
        (self.result, self.attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_exposes_value() {
        let o = Outcome::succeeded(42, 3);
        assert_eq!(o.value(), Some(&42));
        assert!(o.error().is_none());
        assert!(o.is_success());
        assert_eq!(o.attempt(), 3);
        assert_eq!(o.state(), Termination::Succeeded);
        assert_eq!(o.into_result().ok(), Some(42));
    }

    #[test]
    fn exhausted_keeps_last_error() {
        let o: Outcome<u8> = Outcome::exhausted(TaskError::fail("persistent failure"), 2);
        assert!(o.value().is_none());
        assert_eq!(o.error().map(ToString::to_string).as_deref(), Some("persistent failure"));
        assert_eq!(o.state(), Termination::Exhausted);
        let (res, attempt) = o.into_parts();
        assert!(res.is_err());
        assert_eq!(attempt, 2);
    }

    #[test]
    fn canceled_reports_cancellation() {
        let o: Outcome<()> = Outcome::canceled(1);
        assert!(o.error().is_some_and(TaskError::is_canceled));
        assert_eq!(o.state(), Termination::Canceled);
        assert!(matches!(o.result(), Err(TaskError::Canceled)));
    }
}
