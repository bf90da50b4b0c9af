//! Process shutdown signals.
//!
//! A parent [`CancellationToken`] is the only way to abort an invocation from outside.
//! These helpers tie it to process shutdown.
//!
//! On Unix, SIGINT and SIGTERM are watched. Elsewhere only Ctrl-C is.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Completes when the process receives SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = interrupt.recv() => tracing::debug!(signal = "SIGINT", "signal received"),
        _ = terminate.recv() => tracing::debug!(signal = "SIGTERM", "signal received"),
    }
    Ok(())
}

/// Completes on Ctrl-C.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Spawns a watcher that cancels `token` on the first shutdown signal.
///
/// The watcher exits quietly if `token` is cancelled by someone else first. If signal
/// handlers cannot be installed, the token is cancelled right away so callers do not run
/// unsupervised.
pub fn cancel_on_shutdown(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            res = wait_for_shutdown_signal() => {
                match res {
                    Ok(()) => tracing::info!("shutdown signal received"),
                    Err(e) => tracing::error!(error = %e, "failed to install signal handlers"),
                }
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn watcher_exits_when_token_cancelled_elsewhere() {
        let token = CancellationToken::new();
        let watcher = cancel_on_shutdown(token.clone());
        token.cancel();
        watcher.await.unwrap();
        assert!(token.is_cancelled());
    }
}
