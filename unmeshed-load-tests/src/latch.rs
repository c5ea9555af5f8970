use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Countdown barrier: `wait` returns once `count_down` has been called `count` times.
///
/// Counting down past zero is a no-op.
pub struct CompletionLatch {
    remaining: watch::Sender<usize>,
}

impl CompletionLatch {
    pub fn new(count: usize) -> Self {
        let (remaining, _) = watch::channel(count);
        Self { remaining }
    }

    pub fn count_down(&self) {
        self.remaining.send_modify(|n| *n = n.saturating_sub(1));
    }

    pub fn remaining(&self) -> usize {
        *self.remaining.borrow()
    }

    pub async fn wait(&self) {
        let mut rx = self.remaining.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Returns `false` if the count did not reach zero within `timeout`.
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.wait()).await.is_ok()
    }

    /// Guard that counts down once when dropped, whether the unit of work
    /// succeeded, failed or panicked.
    pub fn guard(self: &Arc<Self>) -> LatchGuard {
        LatchGuard { latch: Arc::clone(self) }
    }
}

pub struct LatchGuard {
    latch: Arc<CompletionLatch>,
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}
