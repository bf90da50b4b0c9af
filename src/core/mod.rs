//! Executor internals.
//!
//! - [`Executor`] runs the attempt loop (`executor.rs`), one attempt at a time via `runner.rs`
//! - [`ExecutorBuilder`] validates and assembles executors
//! - [`ExecutorConfig`] is the declarative form of an executor
//! - [`Outcome`] / [`Termination`] describe the final result of an invocation

mod builder;
mod callbacks;
mod config;
mod executor;
mod outcome;
mod runner;

pub use builder::ExecutorBuilder;
pub use callbacks::{OnRetry, OnTimeoutSet};
pub use config::{ExecutorConfig, RetryConfig, TimeoutConfig};
pub use executor::{Executor, execute_with_retries, execute_with_timeout};
pub use outcome::{Outcome, Termination};
