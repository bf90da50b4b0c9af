//! # retryvisor
//!
//! **Retryvisor** runs a fallible, cancelable async unit of work under composable
//! policies for *how many times* to retry and *how long* each attempt may take, so
//! transient failures (network blips, slow endpoints) are absorbed without bespoke
//! retry code at every call site.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!    ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//!    │  RetryStrategy   │   │ TimeoutStrategy  │   │    listeners     │
//!    │ (exp/lin/fixed/  │   │ (fixed/progress./│   │ on_retry,        │
//!    │  none/condition.)│   │  linear/cond.)   │   │ on_timeout_set   │
//!    └────────┬─────────┘   └────────┬─────────┘   └────────┬─────────┘
//!             ▼                      ▼                      ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Executor (immutable, shareable)                                  │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ execute(parent_token, task)
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  attempt loop                                                     │
//! │   attempt n: child token ◄── parent token, bounded by timeout(n)  │
//! │              task.run(child) ─► Ok / Err / Timeout / Canceled     │
//! │   between attempts: sleep(delay(n)) racing parent.cancelled()     │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//!   Outcome { result, attempt, state }
//! ```
//!
//! ### Lifecycle
//! ```text
//! Running(1) ──► Running(2) ──► ... ──► Running(max_attempts)
//!     │              │                        │
//!     ├─► Succeeded  ├─► Succeeded            ├─► Succeeded
//!     ├─► Exhausted  ├─► Exhausted            └─► Exhausted
//!     └─► Canceled   └─► Canceled
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                          |
//! |-------------------|-------------------------------------------------------------|---------------------------------------------|
//! | **Execution**     | Attempt loop with per-attempt bounds and cancellation.      | [`Executor`], [`Outcome`]                   |
//! | **Retry**         | Whether and when to retry a failed attempt.                 | [`RetryStrategy`], [`ExponentialBackoff`]   |
//! | **Timeouts**      | Bound of each attempt.                                      | [`TimeoutStrategy`], [`ProgressiveTimeout`] |
//! | **Tasks**         | Units of work as trait objects or closures.                 | [`Task`], [`TaskFn`]                        |
//! | **Errors**        | Typed attempt and configuration errors.                     | [`TaskError`], [`ConfigError`]              |
//! | **Configuration** | Declarative strategy selection (`serde` feature).           | [`ExecutorConfig`]                          |
//! | **Shutdown**      | Cancel a parent token on OS signals.                        | [`cancel_on_shutdown`]                      |
//!
//! ## Optional features
//! - `serde`: derives `Serialize`/`Deserialize` for [`ExecutorConfig`].
//!
//! ## Logging
//! The attempt loop emits [`tracing`] events (attempt start, retry scheduled, giving up,
//! cancellation). Install any subscriber to see them.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use retryvisor::{Executor, ExponentialBackoff, ProgressiveTimeout, TaskError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = Executor::builder()
//!         .with_retry_strategy(ExponentialBackoff::new(4, Duration::from_millis(10), 2.0))
//!         .with_timeout_strategy(ProgressiveTimeout::new(
//!             Duration::from_millis(100),
//!             2.0,
//!             Duration::from_secs(1),
//!         ))
//!         .on_retry(|attempt, err, delay| {
//!             println!("attempt {attempt} failed: {err}; retrying in {delay:?}");
//!         })
//!         .build()?;
//!
//!     let parent = CancellationToken::new();
//!     let ip = executor
//!         .run_simple(&parent, |ctx: CancellationToken| async move {
//!             if ctx.is_cancelled() {
//!                 return Err(TaskError::Canceled);
//!             }
//!             Ok::<_, TaskError>("203.0.113.7".to_string())
//!         })
//!         .await?;
//!
//!     println!("detected {ip}");
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod os_signals;
mod policies;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{
    Executor, ExecutorBuilder, ExecutorConfig, OnRetry, OnTimeoutSet, Outcome, RetryConfig,
    Termination, TimeoutConfig, execute_with_retries, execute_with_timeout,
};
pub use error::{BoxError, ConfigError, TaskError};
pub use os_signals::{cancel_on_shutdown, wait_for_shutdown_signal};
pub use policies::{
    ConditionalRetry, ConditionalTimeout, DEFAULT_MAX_DELAY, DEFAULT_TIMEOUT, DelayFn,
    ExponentialBackoff, FixedDelay, FixedTimeout, JitterPolicy, LinearBackoff, LinearTimeout,
    NoRetry, ProgressiveTimeout, RetryPredicate, RetryStrategy, TimeoutStrategy,
};
pub use tasks::{Task, TaskFn};
