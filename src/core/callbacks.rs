//! Instrumentation listeners.
//!
//! Listeners are plain functions invoked synchronously on the executing task, strictly in
//! attempt order and before the event they describe. They observe; they cannot steer the loop.

use std::sync::Arc;
use std::time::Duration;

use crate::error::TaskError;

/// Called before waiting for the next attempt: `(failed attempt, its error, delay)`.
pub type OnRetry = Arc<dyn Fn(u32, &TaskError, Duration) + Send + Sync>;

/// Called before an attempt starts: `(attempt, timeout)`.
pub type OnTimeoutSet = Arc<dyn Fn(u32, Duration) + Send + Sync>;
