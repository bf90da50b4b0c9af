//! Validating builder for [`Executor`].

use std::sync::Arc;
use std::time::Duration;

use crate::{
    core::{
        callbacks::{OnRetry, OnTimeoutSet},
        executor::Executor,
    },
    error::{ConfigError, TaskError},
    policies::{ExponentialBackoff, FixedTimeout, RetryStrategy, TimeoutStrategy},
};

/// Builder for constructing an [`Executor`].
///
/// Omitted options fall back to the defaults: exponential backoff (3 attempts, 1s, ×2,
/// 30s cap), fixed 30s timeout, no listeners.
pub struct ExecutorBuilder {
    retry: Arc<dyn RetryStrategy>,
    timeout: Arc<dyn TimeoutStrategy>,
    on_retry: Option<OnRetry>,
    on_timeout_set: Option<OnTimeoutSet>,
}

impl ExecutorBuilder {
    /// Creates a builder holding the defaults.
    pub fn new() -> Self {
        Self {
            retry: Arc::new(ExponentialBackoff::default()),
            timeout: Arc::new(FixedTimeout::default()),
            on_retry: None,
            on_timeout_set: None,
        }
    }

    /// Sets the retry strategy.
    pub fn with_retry_strategy(mut self, strategy: impl RetryStrategy + 'static) -> Self {
        self.retry = Arc::new(strategy);
        self
    }

    /// Sets the timeout strategy.
    pub fn with_timeout_strategy(mut self, strategy: impl TimeoutStrategy + 'static) -> Self {
        self.timeout = Arc::new(strategy);
        self
    }

    /// Registers a listener called before each wait between attempts.
    ///
    /// Receives the failed attempt number, its error and the delay about to be waited.
    pub fn on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, &TaskError, Duration) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(f));
        self
    }

    /// Registers a listener called before each attempt with its timeout.
    pub fn on_timeout_set<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, Duration) + Send + Sync + 'static,
    {
        self.on_timeout_set = Some(Arc::new(f));
        self
    }

    /// Builds the executor.
    ///
    /// Fails with [`ConfigError::ZeroMaxAttempts`] when the retry strategy allows no attempt
    /// at all; such an executor would report success without ever running the task.
    pub fn build(self) -> Result<Executor, ConfigError> {
        if self.retry.max_attempts() == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        Ok(Executor::from_parts(
            self.retry,
            self.timeout,
            self.on_retry,
            self.on_timeout_set,
        ))
    }
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
