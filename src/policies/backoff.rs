//! # Counting retry strategies.
//!
//! Three strategies share the same retry rule (retry while `attempt < max_attempts`) and
//! differ only in how the delay after attempt `n` grows:
//!
//! | Strategy               | `delay(n)`                                  |
//! |------------------------|---------------------------------------------|
//! | [`ExponentialBackoff`] | `min(base × multiplier^(n−1), max_delay)`   |
//! | [`LinearBackoff`]      | `base + increment × (n−1)`                  |
//! | [`FixedDelay`]         | `delay`                                     |
//!
//! Each delay is derived purely from the attempt number, then jitter (if any) is applied.
//! Jitter output never feeds back into later delays.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{ExponentialBackoff, RetryStrategy};
//!
//! let backoff = ExponentialBackoff::new(5, Duration::from_millis(100), 2.0)
//!     .with_max_delay(Duration::from_millis(500));
//!
//! assert_eq!(backoff.delay(1), Duration::from_millis(100));
//! assert_eq!(backoff.delay(2), Duration::from_millis(200));
//! // 100ms × 2^3 = 800ms → capped
//! assert_eq!(backoff.delay(4), Duration::from_millis(500));
//! ```

use std::time::Duration;

use crate::error::TaskError;
use crate::policies::jitter::JitterPolicy;
use crate::policies::retry::{RetryStrategy, below_ceiling};

/// Default cap for [`ExponentialBackoff`].
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Computes `base × factor^(attempt−1)` clamped to `max`.
///
/// Non-finite, negative or unrepresentable intermediate values clamp to `max` as well.
pub(crate) fn grow_exponential(base: Duration, factor: f64, attempt: u32, max: Duration) -> Duration {
    let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
    let unclamped_secs = base.as_secs_f64() * factor.powi(exp);

    if unclamped_secs < 0.0 {
        return max;
    }
    Duration::try_from_secs_f64(unclamped_secs).map_or(max, |d| d.min(max))
}

/// Computes `base + increment × (attempt−1)`, saturating instead of overflowing.
pub(crate) fn grow_linear(base: Duration, increment: Duration, attempt: u32) -> Duration {
    base.saturating_add(increment.saturating_mul(attempt.saturating_sub(1)))
}

/// Exponential backoff: the delay multiplies by `multiplier` after every failure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialBackoff {
    /// Maximum number of attempts, first attempt included.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub multiplier: f64,
    /// Cap on any single delay.
    pub max_delay: Duration,
    /// Jitter applied after capping.
    pub jitter: JitterPolicy,
}

impl ExponentialBackoff {
    /// Creates an exponential strategy capped at [`DEFAULT_MAX_DELAY`] (30s), without jitter.
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            multiplier,
            max_delay: DEFAULT_MAX_DELAY,
            jitter: JitterPolicy::None,
        }
    }

    /// Returns the strategy with a different delay cap.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Returns the strategy with jitter enabled.
    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }
}

impl Default for ExponentialBackoff {
    /// 3 attempts, 1s base, ×2, capped at 30s.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), 2.0)
    }
}

impl RetryStrategy for ExponentialBackoff {
    fn should_retry(&self, attempt: u32, _error: &TaskError) -> bool {
        below_ceiling(attempt, self.max_attempts)
    }

    fn delay(&self, attempt: u32) -> Duration {
        let base = grow_exponential(self.base_delay, self.multiplier, attempt, self.max_delay);
        self.jitter.apply(base)
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Linear backoff: the delay grows by `increment` after every failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearBackoff {
    /// Maximum number of attempts, first attempt included.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Added to the delay for every further attempt.
    pub increment: Duration,
    /// Jitter applied to each delay.
    pub jitter: JitterPolicy,
}

impl LinearBackoff {
    /// Creates a linear strategy without jitter.
    pub fn new(max_attempts: u32, base_delay: Duration, increment: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            increment,
            jitter: JitterPolicy::None,
        }
    }

    /// Returns the strategy with jitter enabled.
    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }
}

impl RetryStrategy for LinearBackoff {
    fn should_retry(&self, attempt: u32, _error: &TaskError) -> bool {
        below_ceiling(attempt, self.max_attempts)
    }

    fn delay(&self, attempt: u32) -> Duration {
        self.jitter
            .apply(grow_linear(self.base_delay, self.increment, attempt))
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Fixed delay between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDelay {
    /// Maximum number of attempts, first attempt included.
    pub max_attempts: u32,
    /// Delay between any two attempts.
    pub delay: Duration,
    /// Jitter applied to each delay.
    pub jitter: JitterPolicy,
}

impl FixedDelay {
    /// Creates a fixed-delay strategy without jitter.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            jitter: JitterPolicy::None,
        }
    }

    /// Returns the strategy with jitter enabled.
    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }
}

impl RetryStrategy for FixedDelay {
    fn should_retry(&self, attempt: u32, _error: &TaskError) -> bool {
        below_ceiling(attempt, self.max_attempts)
    }

    fn delay(&self, _attempt: u32) -> Duration {
        self.jitter.apply(self.delay)
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err() -> TaskError {
        TaskError::fail("boom")
    }

    #[test]
    fn exponential_doubles_from_base() {
        let s = ExponentialBackoff::new(3, Duration::from_secs(1), 2.0);
        assert_eq!(s.delay(1), Duration::from_secs(1));
        assert_eq!(s.delay(2), Duration::from_secs(2));
        assert_eq!(s.max_attempts(), 3);
    }

    #[test]
    fn exponential_retries_only_below_max_attempts() {
        let s = ExponentialBackoff::new(3, Duration::from_secs(1), 2.0);
        assert!(s.should_retry(1, &err()));
        assert!(s.should_retry(2, &err()));
        assert!(!s.should_retry(3, &err()));
        assert!(!s.should_retry(4, &err()));
    }

    #[test]
    fn exponential_caps_at_default_max_delay() {
        let s = ExponentialBackoff::new(20, Duration::from_secs(1), 2.0);
        assert_eq!(s.max_delay, DEFAULT_MAX_DELAY);
        assert_eq!(s.delay(5), Duration::from_secs(16));
        assert_eq!(s.delay(6), Duration::from_secs(30));
        assert_eq!(s.delay(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn exponential_factor_one_is_constant() {
        let s = ExponentialBackoff::new(5, Duration::from_millis(250), 1.0);
        for attempt in 1..=5 {
            assert_eq!(s.delay(attempt), Duration::from_millis(250));
        }
    }

    #[test]
    fn exponential_non_finite_clamps_to_max() {
        let s = ExponentialBackoff::new(5, Duration::from_millis(100), f64::INFINITY)
            .with_max_delay(Duration::from_secs(5));
        assert_eq!(s.delay(2), Duration::from_secs(5));

        let s = ExponentialBackoff::new(5, Duration::from_millis(100), f64::NAN)
            .with_max_delay(Duration::from_secs(5));
        assert_eq!(s.delay(2), Duration::from_secs(5));
    }

    #[test]
    fn exponential_uncapped_saturates_at_duration_max() {
        let s = ExponentialBackoff::new(100, Duration::from_secs(1), 2.0)
            .with_max_delay(Duration::MAX);
        assert_eq!(s.delay(64), Duration::from_secs(1 << 63));
        assert_eq!(s.delay(65), Duration::MAX);
        assert_eq!(s.delay(u32::MAX), Duration::MAX);
    }

    #[test]
    fn exponential_default_matches_executor_default() {
        let s = ExponentialBackoff::default();
        assert_eq!(s.max_attempts, 3);
        assert_eq!(s.base_delay, Duration::from_secs(1));
        assert_eq!(s.multiplier, 2.0);
        assert_eq!(s.max_delay, Duration::from_secs(30));
    }

    #[test]
    fn exponential_jitter_never_exceeds_cap() {
        let s = ExponentialBackoff::new(10, Duration::from_millis(100), 2.0)
            .with_max_delay(Duration::from_millis(300))
            .with_jitter(JitterPolicy::Full);
        for attempt in 1..=10 {
            assert!(s.delay(attempt) <= Duration::from_millis(300));
        }
    }

    #[test]
    fn linear_adds_increment_per_attempt() {
        let s = LinearBackoff::new(4, Duration::from_millis(100), Duration::from_millis(50));
        assert_eq!(s.delay(1), Duration::from_millis(100));
        assert_eq!(s.delay(2), Duration::from_millis(150));
        assert_eq!(s.delay(3), Duration::from_millis(200));
        assert!(s.should_retry(3, &err()));
        assert!(!s.should_retry(4, &err()));
    }

    #[test]
    fn linear_saturates_instead_of_overflowing() {
        let s = LinearBackoff::new(u32::MAX, Duration::MAX, Duration::from_secs(1));
        assert_eq!(s.delay(u32::MAX), Duration::MAX);
    }

    #[test]
    fn fixed_delay_is_identical_for_every_attempt() {
        let s = FixedDelay::new(3, Duration::from_millis(10));
        let first = s.delay(1);
        for attempt in 2..=100 {
            assert_eq!(s.delay(attempt), first);
        }
        assert!(s.should_retry(2, &err()));
        assert!(!s.should_retry(3, &err()));
    }

    #[test]
    fn counting_strategies_retry_timeouts_like_any_error() {
        let timeout = TaskError::Timeout {
            timeout: Duration::from_millis(50),
        };
        assert!(FixedDelay::new(2, Duration::ZERO).should_retry(1, &timeout));
        assert!(LinearBackoff::new(2, Duration::ZERO, Duration::ZERO).should_retry(1, &timeout));
        assert!(ExponentialBackoff::new(2, Duration::ZERO, 2.0).should_retry(1, &timeout));
    }

    #[test]
    fn grow_helpers_treat_attempt_zero_as_first() {
        let base = Duration::from_millis(10);
        assert_eq!(grow_exponential(base, 2.0, 0, Duration::MAX), base);
        assert_eq!(grow_linear(base, base, 0), base);
    }
}
