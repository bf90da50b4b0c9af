//! # Retry strategy contract.
//!
//! A [`RetryStrategy`] answers three questions for the attempt loop:
//! - [`max_attempts`](RetryStrategy::max_attempts): the hard ceiling, first attempt included;
//! - [`should_retry`](RetryStrategy::should_retry): whether a **failed** attempt gets a successor;
//! - [`delay`](RetryStrategy::delay): how long to wait after attempt `n` before attempt `n + 1`.
//!
//! Attempt numbers are 1-based. Strategies are immutable and shared across concurrent
//! invocations, so they hold no per-call state.
//!
//! Built-in strategies:
//! - [`ExponentialBackoff`](crate::ExponentialBackoff), [`LinearBackoff`](crate::LinearBackoff),
//!   [`FixedDelay`](crate::FixedDelay)
//! - [`NoRetry`]
//! - [`ConditionalRetry`](crate::ConditionalRetry)

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::TaskError;

/// Decides whether and when a failed attempt is retried.
///
/// `should_retry` is only ever called with an attempt error, never after success and never
/// once the parent token is cancelled. A [`TaskError::Canceled`] returned by the task itself
/// while the parent is live is an ordinary attempt error. The loop runs at most
/// [`max_attempts`](Self::max_attempts) attempts regardless of what `should_retry` answers.
pub trait RetryStrategy: Send + Sync + fmt::Debug {
    /// Returns `true` if another attempt should follow failed attempt `attempt`.
    fn should_retry(&self, attempt: u32, error: &TaskError) -> bool;

    /// Delay to wait after attempt `attempt` completed.
    fn delay(&self, attempt: u32) -> Duration;

    /// Maximum number of attempts, including the first one.
    fn max_attempts(&self) -> u32;
}

impl<S: RetryStrategy + ?Sized> RetryStrategy for Arc<S> {
    fn should_retry(&self, attempt: u32, error: &TaskError) -> bool {
        (**self).should_retry(attempt, error)
    }

    fn delay(&self, attempt: u32) -> Duration {
        (**self).delay(attempt)
    }

    fn max_attempts(&self) -> u32 {
        (**self).max_attempts()
    }
}

/// Fail fast: exactly one attempt, never retried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoRetry;

impl RetryStrategy for NoRetry {
    fn should_retry(&self, _attempt: u32, _error: &TaskError) -> bool {
        false
    }

    fn delay(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }

    fn max_attempts(&self) -> u32 {
        1
    }
}

/// Shared rule of the counting strategies: retry while below the ceiling.
///
/// The error is always present here, so the "error is set" half of the rule holds.
#[inline]
pub(crate) fn below_ceiling(attempt: u32, max_attempts: u32) -> bool {
    attempt < max_attempts
}
