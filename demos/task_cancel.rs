//! # Example: task_cancel
//!
//! Demonstrates cancellation of a retrying task through its parent token.
//!
//! The task always fails, so the executor keeps backing off. The parent
//! token is cancelled either by Ctrl-C (via [`cancel_on_shutdown`]) or by a
//! timer after 2 seconds, whichever comes first. The outcome is `Canceled`.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► cancel_on_shutdown(parent)      (SIGINT/SIGTERM)
//!   ├─► spawn timer: sleep 2s → parent.cancel()
//!   └─► Executor::run(parent, flaky)
//!         ├─► attempt 1 → Err → sleep 500ms
//!         ├─► attempt 2 → Err → sleep 500ms
//!         ├─► ...
//!         └─► parent cancelled → Outcome { state: Canceled }
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example task_cancel
//! ```

use std::time::Duration;

use retryvisor::{Executor, FixedDelay, FixedTimeout, TaskError, Termination, cancel_on_shutdown};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== task_cancel example ===\n");

    // 1. Parent token, cancelled on OS signal
    let parent = CancellationToken::new();
    let _signals = cancel_on_shutdown(parent.clone());

    // 2. Or after 2 seconds
    let timer = parent.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        println!("[timer] cancelling parent");
        timer.cancel();
    });

    // 3. Effectively unlimited retries, 500ms apart
    let executor = Executor::builder()
        .with_retry_strategy(FixedDelay::new(u32::MAX, Duration::from_millis(500)))
        .with_timeout_strategy(FixedTimeout::new(Duration::from_secs(1)))
        .build()?;

    let outcome = executor
        .run(&parent, |_ctx: CancellationToken| async move {
            Err::<(), _>(TaskError::fail("upstream unavailable"))
        })
        .await;

    assert_eq!(outcome.state(), Termination::Canceled);
    println!(
        "\nstate={:?} attempt={} error={:?}",
        outcome.state(),
        outcome.attempt(),
        outcome.error().map(|e| e.to_string())
    );
    Ok(())
}
