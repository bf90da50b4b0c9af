//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing async cancelable units of work
//! - [`TaskFn`] - closure-backed task implementation

mod task;
mod task_fn;

pub use task::Task;
pub use task_fn::TaskFn;
