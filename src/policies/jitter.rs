//! # Jitter policy for retry delays.
//!
//! [`JitterPolicy`] adds randomness to backoff delays to prevent thundering herd effects
//! when many callers retry against the same upstream at once.
//!
//! - [`JitterPolicy::None`] - no randomization, predictable delays
//! - [`JitterPolicy::Full`] - random delay in [0, delay] (most aggressive)
//! - [`JitterPolicy::Equal`] - delay/2 + random[0, delay/2] (balanced)
//!
//! Jitter is applied after the delay has been capped, so a jittered delay never exceeds
//! the strategy's cap.

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use exact backoff delay.
    ///
    /// Use when:
    /// - Only one caller retrying (no herd risk)
    /// - Predictable timing required
    /// - Testing/debugging
    #[default]
    None,

    /// Full jitter: random delay in [0, delay].
    ///
    /// Can significantly reduce the delay; maximum load spreading.
    Full,

    /// Equal jitter: delay/2 + random[0, delay/2].
    ///
    /// Preserves ~75% of the original delay on average.
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => scale(delay),
            JitterPolicy::Equal => {
                let floor = delay / 2;
                floor.saturating_add(scale(delay - floor))
            }
        }
    }
}

/// `d` scaled by a uniform factor in [0, 1].
fn scale(d: Duration) -> Duration {
    if d.is_zero() {
        return d;
    }
    let factor: f64 = rand::rng().random_range(0.0..=1.0);
    Duration::try_from_secs_f64(d.as_secs_f64() * factor).map_or(d, |s| s.min(d))
}
