//! # Declarative executor configuration.
//!
//! Provides [`ExecutorConfig`]: a plain-data description of which retry and timeout
//! strategies an executor uses, suitable for loading from a config file.
//!
//! Config is used in two ways:
//! 1. **Defaults**: `ExecutorConfig::default()` mirrors `Executor::default()`
//! 2. **Executor creation**: `Executor::from_config(&config)` / `config.build()`
//!
//! With the `serde` feature, the types derive `Serialize`/`Deserialize`. Variants are
//! tagged by `kind` (snake_case) and durations are integer milliseconds:
//!
//! ```json
//! {
//!   "retry":   { "kind": "fixed", "max_attempts": 4, "delay": 500 },
//!   "timeout": { "kind": "progressive", "base": 1000, "multiplier": 2.0, "max": 10000 }
//! }
//! ```
//!
//! ## Sentinel values
//! - timeout `0` → the attempt is unbounded
//!
//! Conditional strategies take closures and have no config form.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    core::{builder::ExecutorBuilder, executor::Executor},
    error::ConfigError,
    policies::{
        DEFAULT_MAX_DELAY, DEFAULT_TIMEOUT, ExponentialBackoff, FixedDelay, FixedTimeout,
        LinearBackoff, LinearTimeout, NoRetry, ProgressiveTimeout, RetryStrategy, TimeoutStrategy,
    },
};

/// Retry strategy selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RetryConfig {
    /// See [`ExponentialBackoff`].
    Exponential {
        /// Maximum attempts, first included.
        max_attempts: u32,
        /// Delay after the first failure.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        base_delay: Duration,
        /// Growth factor.
        multiplier: f64,
        /// Delay cap (defaults to 30s when omitted).
        #[cfg_attr(feature = "serde", serde(with = "millis", default = "default_max_delay"))]
        max_delay: Duration,
    },
    /// See [`LinearBackoff`].
    Linear {
        /// Maximum attempts, first included.
        max_attempts: u32,
        /// Delay after the first failure.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        base_delay: Duration,
        /// Added per further attempt.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        increment: Duration,
    },
    /// See [`FixedDelay`].
    Fixed {
        /// Maximum attempts, first included.
        max_attempts: u32,
        /// Delay between attempts.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        delay: Duration,
    },
    /// See [`NoRetry`].
    None,
}

impl RetryConfig {
    /// Attempt ceiling of the described strategy.
    pub fn max_attempts(&self) -> u32 {
        match self {
            RetryConfig::Exponential { max_attempts, .. }
            | RetryConfig::Linear { max_attempts, .. }
            | RetryConfig::Fixed { max_attempts, .. } => *max_attempts,
            RetryConfig::None => 1,
        }
    }

    /// Instantiates the described strategy.
    pub fn to_strategy(&self) -> Result<Arc<dyn RetryStrategy>, ConfigError> {
        Ok(match *self {
            RetryConfig::Exponential {
                max_attempts,
                base_delay,
                multiplier,
                max_delay,
            } => Arc::new(
                ExponentialBackoff::new(max_attempts, base_delay, check_multiplier(multiplier)?)
                    .with_max_delay(max_delay),
            ),
            RetryConfig::Linear {
                max_attempts,
                base_delay,
                increment,
            } => Arc::new(LinearBackoff::new(max_attempts, base_delay, increment)),
            RetryConfig::Fixed {
                max_attempts,
                delay,
            } => Arc::new(FixedDelay::new(max_attempts, delay)),
            RetryConfig::None => Arc::new(NoRetry),
        })
    }
}

impl Default for RetryConfig {
    /// 3 attempts, 1s base, ×2, capped at 30s.
    fn default() -> Self {
        RetryConfig::Exponential {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// Timeout strategy selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TimeoutConfig {
    /// See [`FixedTimeout`].
    Fixed {
        /// Bound of every attempt (`0` = unbounded).
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        timeout: Duration,
    },
    /// See [`ProgressiveTimeout`].
    Progressive {
        /// Bound of the first attempt.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        base: Duration,
        /// Growth factor.
        multiplier: f64,
        /// Cap.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        max: Duration,
    },
    /// See [`LinearTimeout`].
    Linear {
        /// Bound of the first attempt.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        base: Duration,
        /// Added per further attempt.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        increment: Duration,
        /// Cap.
        #[cfg_attr(feature = "serde", serde(with = "millis"))]
        max: Duration,
    },
}

impl TimeoutConfig {
    /// Instantiates the described strategy.
    pub fn to_strategy(&self) -> Result<Arc<dyn TimeoutStrategy>, ConfigError> {
        Ok(match *self {
            TimeoutConfig::Fixed { timeout } => Arc::new(FixedTimeout::new(timeout)),
            TimeoutConfig::Progressive {
                base,
                multiplier,
                max,
            } => Arc::new(ProgressiveTimeout::new(base, check_multiplier(multiplier)?, max)),
            TimeoutConfig::Linear {
                base,
                increment,
                max,
            } => Arc::new(LinearTimeout::new(base, increment, max)),
        })
    }
}

impl Default for TimeoutConfig {
    /// 30 seconds per attempt.
    fn default() -> Self {
        TimeoutConfig::Fixed {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Declarative description of an [`Executor`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExecutorConfig {
    /// Retry strategy (default: exponential backoff).
    pub retry: RetryConfig,
    /// Timeout strategy (default: fixed 30s).
    pub timeout: TimeoutConfig,
}

impl ExecutorConfig {
    /// Returns a builder seeded with the described strategies, ready for listeners.
    pub fn to_builder(&self) -> Result<ExecutorBuilder, ConfigError> {
        Ok(ExecutorBuilder::new()
            .with_retry_strategy(self.retry.to_strategy()?)
            .with_timeout_strategy(self.timeout.to_strategy()?))
    }

    /// Validates the config and builds an executor without listeners.
    pub fn build(&self) -> Result<Executor, ConfigError> {
        self.to_builder()?.build()
    }
}

impl Executor {
    /// Builds an executor from a declarative config.
    pub fn from_config(config: &ExecutorConfig) -> Result<Self, ConfigError> {
        config.build()
    }
}

fn check_multiplier(multiplier: f64) -> Result<f64, ConfigError> {
    if multiplier.is_finite() && multiplier >= 0.0 {
        Ok(multiplier)
    } else {
        Err(ConfigError::InvalidMultiplier { multiplier })
    }
}

#[cfg(feature = "serde")]
fn default_max_delay() -> Duration {
    DEFAULT_MAX_DELAY
}

/// Durations as integer milliseconds.
#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
