//! Retry and timeout strategies.
//!
//! This module groups the knobs that control **whether/when** a failed attempt is retried
//! and **how long** each attempt may run.
//!
//! ## Contents
//! - [`RetryStrategy`] contract + [`ExponentialBackoff`], [`LinearBackoff`], [`FixedDelay`],
//!   [`NoRetry`], [`ConditionalRetry`]
//! - [`TimeoutStrategy`] contract + [`FixedTimeout`], [`ProgressiveTimeout`],
//!   [`LinearTimeout`], [`ConditionalTimeout`]
//! - [`JitterPolicy`] randomization to avoid thundering herd
//!
//! ## Quick wiring
//! ```text
//! Executor { retry: RetryStrategy, timeout: TimeoutStrategy }
//!      └─► core::executor uses:
//!           - timeout.timeout(n) to bound attempt n
//!           - retry.should_retry(n, err) to continue/exit
//!           - retry.delay(n) to schedule attempt n + 1
//! ```
//!
//! ## Defaults
//! - `ExponentialBackoff::default()` → 3 attempts, 1s base, ×2, capped at 30s, no jitter.
//! - `FixedTimeout::default()` → 30s per attempt.

mod backoff;
mod conditional;
mod jitter;
mod retry;
mod timeout;

pub use backoff::{DEFAULT_MAX_DELAY, ExponentialBackoff, FixedDelay, LinearBackoff};
pub use conditional::{ConditionalRetry, DelayFn, RetryPredicate};
pub use jitter::JitterPolicy;
pub use retry::{NoRetry, RetryStrategy};
pub use timeout::{
    ConditionalTimeout, DEFAULT_TIMEOUT, FixedTimeout, LinearTimeout, ProgressiveTimeout,
    TimeoutStrategy,
};
