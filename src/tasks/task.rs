//! # Task abstraction.
//!
//! This module defines the [`Task`] trait: an async, cancelable unit of work that
//! produces a value of type `V` or a [`TaskError`].
//!
//! A task receives a [`CancellationToken`] derived per attempt by the executor. The token is
//! cancelled when the attempt times out, when the parent token is cancelled, and after the
//! attempt returns. Implementors should watch it and exit promptly.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// # Asynchronous, cancelable unit of work.
///
/// The executor calls [`run`](Task::run) once per attempt, never concurrently for the same
/// invocation. Returning `Ok` ends the invocation successfully whatever the value is.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use retryvisor::{Task, TaskError};
///
/// struct DetectIp;
///
/// #[async_trait]
/// impl Task<String> for DetectIp {
///     fn name(&self) -> &str { "detect-ip" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<String, TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         Ok("203.0.113.7".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Task<V>: Send + Sync {
    /// Human-readable task name, used in log fields.
    fn name(&self) -> &str {
        "task"
    }

    /// Executes one attempt.
    ///
    /// `ctx` is the per-attempt token. Long waits inside the task should race it
    /// (e.g. `tokio::select!` on `ctx.cancelled()`).
    async fn run(&self, ctx: CancellationToken) -> Result<V, TaskError>;
}
