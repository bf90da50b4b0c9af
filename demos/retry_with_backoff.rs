//! # Example: retry_with_backoff
//!
//! Demonstrates how an [`Executor`] absorbs transient failures using
//! [`ExponentialBackoff`] with jitter.
//!
//! The task fails twice before succeeding; the `on_retry` listener prints
//! each scheduled delay.
//!
//! ## Flow
//! ```text
//! Executor::execute()
//!   ├─► attempt 1 → Err("boom #1")
//!   ├─► on_retry(1, err, ≈100ms) → sleep
//!   ├─► attempt 2 → Err("boom #2")
//!   ├─► on_retry(2, err, ≈200ms) → sleep
//!   └─► attempt 3 → Ok("203.0.113.7")
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=retryvisor=debug cargo run --example retry_with_backoff
//! ```

use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use retryvisor::{Executor, ExponentialBackoff, FixedTimeout, JitterPolicy, TaskError, TaskFn};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

static CALLS: AtomicU32 = AtomicU32::new(0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Exponential backoff: 5 attempts, 100ms doubling, capped at 2s, equal jitter
    let backoff = ExponentialBackoff::new(5, Duration::from_millis(100), 2.0)
        .with_max_delay(Duration::from_secs(2))
        .with_jitter(JitterPolicy::Equal);

    // 2. Build the executor
    let executor = Executor::builder()
        .with_retry_strategy(backoff)
        .with_timeout_strategy(FixedTimeout::new(Duration::from_secs(1)))
        .on_retry(|attempt, err, delay| {
            println!("[retry] attempt {attempt} failed ({err}); next in {delay:?}");
        })
        .build()?;

    // 3. A task that fails twice before succeeding
    let lookup = TaskFn::named("ip-lookup", |_ctx: CancellationToken| async move {
        let n = CALLS.fetch_add(1, Ordering::Relaxed) + 1;
        println!("[ip-lookup] call {n}");
        if n <= 2 {
            return Err(TaskError::fail(format!("boom #{n}")));
        }
        Ok("203.0.113.7".to_string())
    });

    // 4. Execute and inspect the outcome
    let parent = CancellationToken::new();
    let outcome = executor.execute(&parent, &lookup).await;

    println!(
        "state={:?} attempt={} value={:?}",
        outcome.state(),
        outcome.attempt(),
        outcome.value()
    );
    Ok(())
}
