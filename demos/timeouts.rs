//! # Example: timeouts
//!
//! Demonstrates per-attempt bounds with [`ProgressiveTimeout`] and the
//! one-shot helpers [`execute_with_timeout`] and [`execute_with_retries`].
//!
//! A slow endpoint needs ~250ms; the first attempt is bounded at 100ms, the
//! second at 200ms, the third at 400ms and succeeds.
//!
//! ## Flow
//! ```text
//! attempt 1 (timeout 100ms) → Timeout
//! attempt 2 (timeout 200ms) → Timeout
//! attempt 3 (timeout 400ms) → Ok
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example timeouts
//! ```

use std::time::Duration;

use retryvisor::{
    Executor, FixedDelay, ProgressiveTimeout, TaskError, execute_with_retries, execute_with_timeout,
};
use tokio_util::sync::CancellationToken;

async fn slow_endpoint(ctx: CancellationToken) -> Result<&'static str, TaskError> {
    tokio::select! {
        _ = ctx.cancelled() => Err(TaskError::Canceled),
        _ = tokio::time::sleep(Duration::from_millis(250)) => Ok("pong"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let parent = CancellationToken::new();

    // 1. Progressive timeout: 100ms, 200ms, 400ms, ...
    let executor = Executor::builder()
        .with_retry_strategy(FixedDelay::new(4, Duration::from_millis(10)))
        .with_timeout_strategy(ProgressiveTimeout::new(
            Duration::from_millis(100),
            2.0,
            Duration::from_secs(1),
        ))
        .on_timeout_set(|attempt, timeout| println!("[timeout] attempt {attempt}: {timeout:?}"))
        .on_retry(|attempt, err, _| println!("[retry] attempt {attempt}: {err}"))
        .build()?;

    let outcome = executor.run(&parent, slow_endpoint).await;
    println!("progressive: state={:?} attempt={}", outcome.state(), outcome.attempt());

    // 2. A single attempt that is too short
    match execute_with_timeout(&parent, Duration::from_millis(50), slow_endpoint).await {
        Ok(v) => println!("single: {v}"),
        Err(e) => println!("single: {e} (timeout={})", e.is_timeout()),
    }

    // 3. Fixed retries with a generous bound
    let v = execute_with_retries(
        &parent,
        2,
        Duration::from_millis(10),
        Duration::from_millis(500),
        slow_endpoint,
    )
    .await?;
    println!("retries: {v}");

    Ok(())
}
