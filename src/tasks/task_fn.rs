//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a fresh
//! future per attempt.
//!
//! ## Concurrency semantics
//! - Each call of [`Task::run`] creates a **new** future that owns its state.
//! - No hidden mutation between attempts; shared state across attempts goes in an
//!   explicit `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use retryvisor::{Task, TaskFn, TaskError};
//!
//! let t = TaskFn::named("lookup", |ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return Err(TaskError::Canceled);
//!     }
//!     Ok::<_, TaskError>(42u32)
//! });
//!
//! assert_eq!(t.name(), "lookup");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::task::Task;

/// Function-backed task implementation.
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates an unnamed task (logged as `"task"`).
    pub fn new(f: F) -> Self {
        Self::named("task", f)
    }

    /// Creates a task with a name used in log fields.
    pub fn named(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for TaskFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskFn").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<V, F, Fut> Task<V> for TaskFn<F>
where
    V: Send + 'static,
    F: Fn(CancellationToken) -> Fut + Send + Sync, // Fn, not FnMut
    Fut: Future<Output = Result<V, TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<V, TaskError> {
        (self.f)(ctx).await
    }
}
