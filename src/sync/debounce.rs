//! Cancellable trailing-edge debounce.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Schedules a single pending task that runs after a quiet period.
///
/// Arming again before the delay elapses cancels the previous task outright;
/// only the last arm in a burst ever runs (trailing edge). At most one task
/// is pending at a time and superseded tasks are never queued.
pub struct Debounce {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// (Re)arm the timer. Must be called from within a tokio runtime.
    pub fn arm<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        if let Some(previous) = self.swap(Some(handle)) {
            previous.abort();
        }
    }

    /// Drop any pending task without running it.
    pub fn cancel(&self) {
        if let Some(previous) = self.swap(None) {
            previous.abort();
        }
    }

    fn swap(&self, handle: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut guard = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_quiet_period() {
        let debounce = Debounce::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        let f = fired.clone();
        debounce.arm(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_cancels_the_previous_task() {
        let debounce = Debounce::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        for _ in 0..5 {
            let f = fired.clone();
            debounce.arm(async move {
                f.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_task() {
        let debounce = Debounce::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicU32::new(0));

        let f = fired.clone();
        debounce.arm(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });
        debounce.cancel();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
