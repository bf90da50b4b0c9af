//! # Executor: the attempt loop.
//!
//! Runs one [`Task`] under a [`RetryStrategy`] and a [`TimeoutStrategy`]:
//! - bounds each attempt per the timeout strategy,
//! - retries failed attempts per the retry strategy,
//! - aborts on cancellation of the caller's parent [`CancellationToken`].
//!
//! ## Architecture
//! ```text
//! Executor::execute(parent, task)
//!
//! for attempt in 1..=max_attempts {
//!   ├─► timeout = timeout_strategy.timeout(attempt)
//!   ├─► on_timeout_set(attempt, timeout)
//!   ├─► run_once(task, parent, timeout)
//!   │       ├─ Ok(v)               ─► Succeeded, return
//!   │       ├─ parent cancelled    ─► Canceled, return
//!   │       └─ Err(e)
//!   ├─► !should_retry(attempt, e)  ─► Exhausted, return
//!   ├─► attempt == max_attempts    ─► Exhausted, return
//!   ├─► delay = retry_strategy.delay(attempt)
//!   ├─► on_retry(attempt, e, delay)
//!   └─► sleep(delay) racing parent.cancelled()
//!          └─ parent cancelled     ─► Canceled, return
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** (never concurrent within one invocation)
//! - A per-attempt timeout is **local**: it becomes an attempt error the strategy may retry
//! - Parent cancellation is **global**: it ends the invocation, no further attempts start
//! - Listeners fire **synchronously** and in attempt order, before the event they describe
//! - The executor holds no per-call state and may be shared across concurrent callers

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        builder::ExecutorBuilder,
        callbacks::{OnRetry, OnTimeoutSet},
        outcome::Outcome,
        runner::run_once,
    },
    error::TaskError,
    policies::{ExponentialBackoff, FixedDelay, FixedTimeout, NoRetry, RetryStrategy, TimeoutStrategy},
    tasks::{Task, TaskFn},
};

/// Immutable orchestrator composing one retry strategy and one timeout strategy.
///
/// Cloning is cheap (shared strategies behind `Arc`).
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{Executor, FixedDelay, FixedTimeout, TaskError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let executor = Executor::builder()
///     .with_retry_strategy(FixedDelay::new(3, Duration::from_millis(10)))
///     .with_timeout_strategy(FixedTimeout::new(Duration::from_secs(1)))
///     .build()?;
///
/// let outcome = executor
///     .run(&CancellationToken::new(), |_ctx| async { Ok::<_, TaskError>("pong") })
///     .await;
///
/// assert_eq!(outcome.value(), Some(&"pong"));
/// assert_eq!(outcome.attempt(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Executor {
    retry: Arc<dyn RetryStrategy>,
    timeout: Arc<dyn TimeoutStrategy>,
    on_retry: Option<OnRetry>,
    on_timeout_set: Option<OnTimeoutSet>,
}

impl Executor {
    /// Starts a builder preloaded with the defaults.
    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }

    /// Assembles an executor from validated parts.
    ///
    /// Callers guarantee `retry.max_attempts() >= 1`.
    pub(crate) fn from_parts(
        retry: Arc<dyn RetryStrategy>,
        timeout: Arc<dyn TimeoutStrategy>,
        on_retry: Option<OnRetry>,
        on_timeout_set: Option<OnTimeoutSet>,
    ) -> Self {
        Self {
            retry,
            timeout,
            on_retry,
            on_timeout_set,
        }
    }

    /// The configured retry strategy.
    pub fn retry_strategy(&self) -> &dyn RetryStrategy {
        self.retry.as_ref()
    }

    /// The configured timeout strategy.
    pub fn timeout_strategy(&self) -> &dyn TimeoutStrategy {
        self.timeout.as_ref()
    }

    /// Runs `task` until success, exhaustion, or cancellation of `parent`.
    ///
    /// Always returns exactly one [`Outcome`]; intermediate failures are absorbed.
    pub async fn execute<V, T>(&self, parent: &CancellationToken, task: &T) -> Outcome<V>
    where
        T: Task<V> + ?Sized,
        V: Send + 'static,
    {
        let max_attempts = self.retry.max_attempts();
        let name = task.name();
        let mut attempt: u32 = 1;

        loop {
            let timeout = self.timeout.timeout(attempt);
            if let Some(on_timeout_set) = &self.on_timeout_set {
                on_timeout_set(attempt, timeout);
            }
            tracing::debug!(
                task = name,
                attempt,
                max_attempts,
                timeout_ms = timeout.as_millis() as u64,
                "attempt starting"
            );

            let err = match run_once(task, parent, timeout).await {
                Ok(value) => {
                    tracing::debug!(task = name, attempt, "attempt succeeded");
                    return Outcome::succeeded(value, attempt);
                }
                Err(_) if parent.is_cancelled() => {
                    tracing::info!(task = name, attempt, "cancelled during attempt");
                    return Outcome::canceled(attempt);
                }
                Err(e) => e,
            };

            if !self.retry.should_retry(attempt, &err) || attempt >= max_attempts {
                tracing::warn!(
                    task = name,
                    attempt,
                    error.label = err.as_label(),
                    error = %err,
                    "giving up"
                );
                return Outcome::exhausted(err, attempt);
            }

            let delay = self.retry.delay(attempt);
            if let Some(on_retry) = &self.on_retry {
                on_retry(attempt, &err, delay);
            }
            tracing::warn!(
                task = name,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error.label = err.as_label(),
                error = %err,
                "retry scheduled"
            );

            let sleep = time::sleep(delay);
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = parent.cancelled() => {
                    tracing::info!(task = name, attempt, "cancelled during backoff");
                    return Outcome::canceled(attempt);
                }
            }

            attempt += 1;
        }
    }

    /// Like [`execute`](Self::execute), returning only the final result.
    pub async fn execute_simple<V, T>(&self, parent: &CancellationToken, task: &T) -> Result<V, TaskError>
    where
        T: Task<V> + ?Sized,
        V: Send + 'static,
    {
        self.execute(parent, task).await.into_result()
    }

    /// Runs a closure as the task (see [`TaskFn`]).
    pub async fn run<V, F, Fut>(&self, parent: &CancellationToken, f: F) -> Outcome<V>
    where
        V: Send + 'static,
        F: Fn(CancellationToken) -> Fut + Send + Sync,
        Fut: Future<Output = Result<V, TaskError>> + Send + 'static,
    {
        self.execute(parent, &TaskFn::new(f)).await
    }

    /// Like [`run`](Self::run), returning only the final result.
    pub async fn run_simple<V, F, Fut>(&self, parent: &CancellationToken, f: F) -> Result<V, TaskError>
    where
        V: Send + 'static,
        F: Fn(CancellationToken) -> Fut + Send + Sync,
        Fut: Future<Output = Result<V, TaskError>> + Send + 'static,
    {
        self.run(parent, f).await.into_result()
    }
}

impl Default for Executor {
    /// Exponential backoff (3 attempts, 1s, ×2, 30s cap), fixed 30s timeout, no listeners.
    fn default() -> Self {
        Self::from_parts(
            Arc::new(ExponentialBackoff::default()),
            Arc::new(FixedTimeout::default()),
            None,
            None,
        )
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field("on_retry", &self.on_retry.is_some())
            .field("on_timeout_set", &self.on_timeout_set.is_some())
            .finish()
    }
}

/// Runs `f` once, bounded by `timeout`.
///
/// Same as an executor built from [`NoRetry`] and [`FixedTimeout`].
pub async fn execute_with_timeout<V, F, Fut>(
    parent: &CancellationToken,
    timeout: Duration,
    f: F,
) -> Result<V, TaskError>
where
    V: Send + 'static,
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, TaskError>> + Send + 'static,
{
    let executor = Executor::from_parts(
        Arc::new(NoRetry),
        Arc::new(FixedTimeout::new(timeout)),
        None,
        None,
    );
    executor.run_simple(parent, f).await
}

/// Runs `f` up to `max_retries + 1` times, `delay` apart, each attempt bounded by `timeout`.
///
/// Same as an executor built from `FixedDelay::new(max_retries + 1, delay)` and
/// [`FixedTimeout`].
pub async fn execute_with_retries<V, F, Fut>(
    parent: &CancellationToken,
    max_retries: u32,
    delay: Duration,
    timeout: Duration,
    f: F,
) -> Result<V, TaskError>
where
    V: Send + 'static,
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, TaskError>> + Send + 'static,
{
    let executor = Executor::from_parts(
        Arc::new(FixedDelay::new(max_retries.saturating_add(1), delay)),
        Arc::new(FixedTimeout::new(timeout)),
        None,
        None,
    );
    executor.run_simple(parent, f).await
}
