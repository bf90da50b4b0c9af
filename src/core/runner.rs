//! # Run a single attempt of a task.
//!
//! Executes one attempt of a [`Task`] under its per-attempt bound.
//!
//! - **Derive a child token** from the parent for this attempt only
//! - **Apply the timeout** (wraps execution in `tokio::time::timeout`)
//! - **Race parent cancellation** against the bounded attempt
//! - **Catch panics** raised by the task and turn them into an attempt error
//!
//! ## Outcomes
//! ```text
//! task.run() → Ok(v)              → Ok(v)
//! task.run() → Err(e)             → Err(e)
//! task.run() panics               → Err(Panicked)
//! timeout exceeded                → drop task future → Err(Timeout)
//! parent cancelled                → drop task future → Err(Canceled)
//! ```
//!
//! ## Rules
//! - The child token is cancelled on **every** exit path (drop guard)
//! - Child cancellation does **not** affect the parent
//! - Parent cancellation is checked first on every poll (`biased`)

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::{error::TaskError, tasks::Task};

/// Executes a single attempt of `task` bounded by `timeout` (`ZERO` = unbounded).
pub(crate) async fn run_once<V, T>(
    task: &T,
    parent: &CancellationToken,
    timeout: Duration,
) -> Result<V, TaskError>
where
    T: Task<V> + ?Sized,
    V: Send + 'static,
{
    let child = parent.child_token();
    let _release = child.clone().drop_guard();

    let attempt = AssertUnwindSafe(task.run(child))
        .catch_unwind()
        .map(|res| res.unwrap_or_else(|payload| Err(panicked(payload))));

    let bounded = async {
        if timeout.is_zero() {
            return attempt.await;
        }
        match time::timeout(timeout, attempt).await {
            Ok(res) => res,
            Err(_elapsed) => Err(TaskError::Timeout { timeout }),
        }
    };

    select! {
        biased;
        _ = parent.cancelled() => Err(TaskError::Canceled),
        res = bounded => res,
    }
}

/// Renders a panic payload as text.
fn panicked(payload: Box<dyn Any + Send>) -> TaskError {
    let message = if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown".to_string()
    };
    TaskError::Panicked { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskFn;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn passes_through_success() {
        let task = TaskFn::new(|_ctx: CancellationToken| async { Ok::<_, TaskError>(7) });
        let res = run_once(&task, &CancellationToken::new(), Duration::from_secs(1)).await;
        assert_eq!(res.ok(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_slow_task() {
        let task = TaskFn::new(|_ctx: CancellationToken| async {
            time::sleep(Duration::from_millis(100)).await;
            Ok::<_, TaskError>(())
        });
        let started = time::Instant::now();
        let res = run_once(&task, &CancellationToken::new(), Duration::from_millis(50)).await;
        assert!(matches!(res, Err(TaskError::Timeout { timeout }) if timeout == Duration::from_millis(50)));
        assert_eq!(started.elapsed(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_means_unbounded() {
        let task = TaskFn::new(|_ctx: CancellationToken| async {
            time::sleep(Duration::from_secs(3600)).await;
            Ok::<_, TaskError>("late")
        });
        let res = run_once(&task, &CancellationToken::new(), Duration::ZERO).await;
        assert_eq!(res.ok(), Some("late"));
    }

    #[tokio::test(start_paused = true)]
    async fn parent_cancellation_wins() {
        let parent = CancellationToken::new();
        let trigger = parent.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        let task = TaskFn::new(|_ctx: CancellationToken| async {
            time::sleep(Duration::from_secs(10)).await;
            Ok::<_, TaskError>(())
        });
        let res = run_once(&task, &parent, Duration::from_secs(30)).await;
        assert!(matches!(res, Err(TaskError::Canceled)));
    }

    #[tokio::test]
    async fn child_token_released_after_attempt() {
        let seen = Arc::new(std::sync::Mutex::new(None::<CancellationToken>));
        let slot = Arc::clone(&seen);
        let task = TaskFn::new(move |ctx: CancellationToken| {
            let slot = Arc::clone(&slot);
            async move {
                *slot.lock().unwrap() = Some(ctx);
                Ok::<_, TaskError>(())
            }
        });
        let parent = CancellationToken::new();
        run_once(&task, &parent, Duration::from_secs(1)).await.unwrap();

        let child = seen.lock().unwrap().take().unwrap();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn panic_becomes_attempt_error() {
        let task = TaskFn::new(|_ctx: CancellationToken| async {
            if true {
                panic!("kaboom");
            }
            Ok::<_, TaskError>(())
        });
        let res = run_once(&task, &CancellationToken::new(), Duration::from_secs(1)).await;
        assert!(matches!(res, Err(TaskError::Panicked { ref message }) if message == "kaboom"));
    }

    #[tokio::test(start_paused = true)]
    async fn child_token_released_on_timeout() {
        let seen = Arc::new(std::sync::Mutex::new(None::<CancellationToken>));
        let slot = Arc::clone(&seen);
        let task = TaskFn::new(move |ctx: CancellationToken| {
            let slot = Arc::clone(&slot);
            async move {
                *slot.lock().unwrap() = Some(ctx);
                time::sleep(Duration::from_secs(10)).await;
                Ok::<_, TaskError>(())
            }
        });
        let res = run_once(&task, &CancellationToken::new(), Duration::from_millis(20)).await;
        assert!(res.is_err_and(|e| e.is_timeout()));

        let child = seen.lock().unwrap().take().unwrap();
        assert!(child.is_cancelled());
    }
}
