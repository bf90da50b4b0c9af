//! # Per-attempt timeout strategies.
//!
//! A [`TimeoutStrategy`] maps an attempt number (1-based) to the bound placed on that
//! attempt's cancellation token.
//!
//! | Strategy               | `timeout(n)`                                   |
//! |------------------------|------------------------------------------------|
//! | [`FixedTimeout`]       | `timeout`                                      |
//! | [`ProgressiveTimeout`] | `min(base × multiplier^(n−1), max)`            |
//! | [`LinearTimeout`]      | `min(base + increment × (n−1), max)`           |
//! | [`ConditionalTimeout`] | caller-supplied function                       |
//!
//! `Duration::ZERO` means "no bound" for that attempt.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::policies::backoff::{grow_exponential, grow_linear};

/// Default per-attempt timeout used by [`Executor::default`](crate::Executor).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Computes the time bound of each attempt.
pub trait TimeoutStrategy: Send + Sync + fmt::Debug {
    /// Timeout applied to attempt `attempt`.
    fn timeout(&self, attempt: u32) -> Duration;
}

impl<S: TimeoutStrategy + ?Sized> TimeoutStrategy for Arc<S> {
    fn timeout(&self, attempt: u32) -> Duration {
        (**self).timeout(attempt)
    }
}

/// Same timeout for every attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTimeout {
    /// The bound of every attempt.
    pub timeout: Duration,
}

impl FixedTimeout {
    /// Creates a fixed timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FixedTimeout {
    /// 30 seconds.
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl TimeoutStrategy for FixedTimeout {
    fn timeout(&self, _attempt: u32) -> Duration {
        self.timeout
    }
}

/// Timeout that grows exponentially with every attempt, up to a cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressiveTimeout {
    /// Bound of the first attempt.
    pub base: Duration,
    /// Multiplicative growth factor.
    pub multiplier: f64,
    /// Cap on any attempt's bound.
    pub max: Duration,
}

impl ProgressiveTimeout {
    /// Creates a progressive timeout.
    pub fn new(base: Duration, multiplier: f64, max: Duration) -> Self {
        Self {
            base,
            multiplier,
            max,
        }
    }
}

impl TimeoutStrategy for ProgressiveTimeout {
    fn timeout(&self, attempt: u32) -> Duration {
        grow_exponential(self.base, self.multiplier, attempt, self.max)
    }
}

/// Timeout that grows by a constant step with every attempt, up to a cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearTimeout {
    /// Bound of the first attempt.
    pub base: Duration,
    /// Added for every further attempt.
    pub increment: Duration,
    /// Cap on any attempt's bound.
    pub max: Duration,
}

impl LinearTimeout {
    /// Creates a linear timeout.
    pub fn new(base: Duration, increment: Duration, max: Duration) -> Self {
        Self {
            base,
            increment,
            max,
        }
    }
}

impl TimeoutStrategy for LinearTimeout {
    fn timeout(&self, attempt: u32) -> Duration {
        grow_linear(self.base, self.increment, attempt).min(self.max)
    }
}

/// Caller-supplied mapping from attempt number to timeout.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use retryvisor::{ConditionalTimeout, TimeoutStrategy};
///
/// // Short first probe, generous afterwards.
/// let t = ConditionalTimeout::new(|attempt| {
///     if attempt == 1 { Duration::from_millis(200) } else { Duration::from_secs(5) }
/// });
/// assert_eq!(t.timeout(1), Duration::from_millis(200));
/// assert_eq!(t.timeout(2), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct ConditionalTimeout {
    f: Arc<dyn Fn(u32) -> Duration + Send + Sync>,
}

impl ConditionalTimeout {
    /// Creates a timeout strategy from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }
}

impl fmt::Debug for ConditionalTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalTimeout").finish_non_exhaustive()
    }
}

impl TimeoutStrategy for ConditionalTimeout {
    fn timeout(&self, attempt: u32) -> Duration {
        (self.f)(attempt)
    }
}
