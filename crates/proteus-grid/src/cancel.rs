use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

/// Cooperative cancellation for a subsystem's background refresh task, replacing the
/// stop-flag-plus-condition-variable pattern the original library's updater threads used
/// (`_wxUpdaterThreadStop`/`_wxUpdaterThreadCond` in `Weather.c`, and the equivalent
/// flags in `Wave.c`/`Ocean.c`). Cloning a [`CancelToken`] shares the same underlying
/// flag, so the owner can signal shutdown and the refresh task can observe it.
#[derive(Clone)]
pub struct CancelToken {
    stopped: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken {
            stopped: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sleeps for `dur` unless cancelled first. Returns `true` if the wait was cut short
    /// by a cancellation, mirroring `pthread_cond_timedwait` waking early on a signal
    /// rather than a timeout.
    pub async fn wait_or_cancelled(&self, dur: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(dur) => false,
            _ = self.notify.notified() => true,
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_returns_false_on_timeout() {
        let token = CancelToken::new();
        let cancelled = token.wait_or_cancelled(Duration::from_millis(10)).await;
        assert!(!cancelled);
    }

    #[tokio::test]
    async fn cancel_wakes_waiter_early() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.wait_or_cancelled(Duration::from_secs(30)).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
        let cancelled = handle.await.unwrap();
        assert!(cancelled);
    }
}
