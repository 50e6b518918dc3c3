//! Deadline-bounded futures with early cancellation.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Why a bounded future did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aborted {
    /// The deadline elapsed.
    Expired,
    /// The token was cancelled.
    Cancelled,
}

/// Run `fut` until it finishes, `timeout` elapses, or `token` is cancelled.
///
/// The token is cancelled on expiry too, so anything else watching it
/// observes the abort.
pub async fn with_deadline<F: Future>(
    fut: F,
    timeout: Duration,
    token: &CancellationToken,
) -> Result<F::Output, Aborted> {
    tokio::select! {
        biased;

        _ = token.cancelled() => Err(Aborted::Cancelled),

        _ = tokio::time::sleep(timeout) => {
            tracing::debug!(?timeout, "Deadline elapsed, aborting request");
            token.cancel();
            Err(Aborted::Expired)
        }

        out = fut => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn completes_before_deadline() {
        let token = CancellationToken::new();
        let out = with_deadline(async { 7 }, Duration::from_secs(1), &token).await;
        assert_eq!(out, Ok(7));
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn expires_and_cancels_token() {
        let token = CancellationToken::new();
        let out = with_deadline(
            std::future::pending::<()>(),
            Duration::from_millis(300_000),
            &token,
        )
        .await;
        assert_eq!(out, Err(Aborted::Expired));
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn early_cancel_wins() {
        let token = CancellationToken::new();
        token.cancel();
        let out = with_deadline(
            std::future::pending::<()>(),
            Duration::from_secs(60),
            &token,
        )
        .await;
        assert_eq!(out, Err(Aborted::Cancelled));
    }
}
