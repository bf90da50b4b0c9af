//! # Conditional retry strategy.
//!
//! [`ConditionalRetry`] delegates both decisions to caller-supplied functions:
//! - a predicate `(attempt, error) -> bool` deciding whether to retry
//!   (default: retry any error);
//! - a delay function `attempt -> Duration` (default: constant `base_delay`).
//!
//! The attempt ceiling always wins: the predicate is not consulted once
//! `attempt >= max_attempts`.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{ConditionalRetry, RetryStrategy, TaskError};
//!
//! // Retry timeouts only, never upstream errors.
//! let s = ConditionalRetry::new(4, Duration::from_millis(100))
//!     .with_predicate(|_attempt, err| err.is_timeout());
//!
//! assert!(s.should_retry(1, &TaskError::Timeout { timeout: Duration::from_secs(1) }));
//! assert!(!s.should_retry(1, &TaskError::fail("KO")));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::TaskError;
use crate::policies::retry::{RetryStrategy, below_ceiling};

/// Retry predicate: `(attempt, error) -> retry?`.
pub type RetryPredicate = Arc<dyn Fn(u32, &TaskError) -> bool + Send + Sync>;

/// Delay function: `attempt -> delay`.
pub type DelayFn = Arc<dyn Fn(u32) -> Duration + Send + Sync>;

/// Retry strategy driven by custom functions.
#[derive(Clone)]
pub struct ConditionalRetry {
    max_attempts: u32,
    base_delay: Duration,
    predicate: Option<RetryPredicate>,
    delay_fn: Option<DelayFn>,
}

impl ConditionalRetry {
    /// Creates a strategy that retries any error with a constant `base_delay`.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            predicate: None,
            delay_fn: None,
        }
    }

    /// Returns the strategy with a retry predicate.
    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(u32, &TaskError) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Returns the strategy with a delay function replacing `base_delay`.
    pub fn with_delay_fn<D>(mut self, delay_fn: D) -> Self
    where
        D: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.delay_fn = Some(Arc::new(delay_fn));
        self
    }
}

impl fmt::Debug for ConditionalRetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalRetry")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("predicate", &self.predicate.is_some())
            .field("delay_fn", &self.delay_fn.is_some())
            .finish()
    }
}

impl RetryStrategy for ConditionalRetry {
    fn should_retry(&self, attempt: u32, error: &TaskError) -> bool {
        if !below_ceiling(attempt, self.max_attempts) {
            return false;
        }
        match &self.predicate {
            Some(predicate) => predicate(attempt, error),
            None => true,
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        match &self.delay_fn {
            Some(delay_fn) => delay_fn(attempt),
            None => self.base_delay,
        }
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_matches_on_message() {
        let s = ConditionalRetry::new(3, Duration::from_millis(10))
            .with_predicate(|_, err| err.to_string() == "retryable");
        assert!(s.should_retry(1, &TaskError::fail("retryable")));
        assert!(!s.should_retry(1, &TaskError::fail("other")));
    }

    #[test]
    fn ceiling_wins_over_predicate() {
        let s = ConditionalRetry::new(2, Duration::ZERO).with_predicate(|_, _| true);
        assert!(s.should_retry(1, &TaskError::fail("x")));
        assert!(!s.should_retry(2, &TaskError::fail("x")));
    }

    #[test]
    fn without_predicate_any_error_retries() {
        let s = ConditionalRetry::new(3, Duration::from_millis(10));
        assert!(s.should_retry(1, &TaskError::fail("x")));
        assert!(s.should_retry(2, &TaskError::Timeout { timeout: Duration::ZERO }));
    }

    #[test]
    fn delay_fn_overrides_base_delay() {
        let plain = ConditionalRetry::new(3, Duration::from_millis(40));
        assert_eq!(plain.delay(1), Duration::from_millis(40));
        assert_eq!(plain.delay(2), Duration::from_millis(40));

        let custom = plain.with_delay_fn(|attempt| Duration::from_millis(u64::from(attempt) * 7));
        assert_eq!(custom.delay(3), Duration::from_millis(21));
        assert_eq!(custom.max_attempts(), 3);
    }

    #[test]
    fn debug_reports_configured_hooks() {
        let s = ConditionalRetry::new(2, Duration::ZERO).with_predicate(|_, _| false);
        let dbg = format!("{s:?}");
        assert!(dbg.contains("predicate: true"));
        assert!(dbg.contains("delay_fn: false"));
    }
}
