//! A cancellable background loop: `start()` spawns
//! the loop and returns a handle; `stop()` signals cancellation and waits
//! for the task to drain, up to a bounded timeout, before hard-cancelling.
//! Deliberately not `tokio-cron-scheduler` — each worker re-reads its own
//! cadence from the settings store every tick, which a fixed cron
//! expression can't express without restarting the scheduled job.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Every worker waits this long after spawning before its first tick, so
/// the pool and settings store are fully warmed up before any query runs.
pub const INITIAL_DELAY: Duration = Duration::from_secs(2);

/// Upper bound `stop()` gives a worker to drain its current tick before
/// aborting the task outright.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WorkerHandle {
    name: &'static str,
    cancel: Arc<Notify>,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    /// Spawns `run` with a fresh cancellation signal; `run` owns the loop
    /// and is expected to race its sleep against `cancel.notified()`.
    pub fn start<F, Fut>(name: &'static str, run: F) -> Self
    where
        F: FnOnce(Arc<Notify>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = Arc::new(Notify::new());
        let join = tokio::spawn(run(cancel.clone()));
        Self { name, cancel, join }
    }

    /// Races the initial delay against cancellation, so a `stop()` issued
    /// immediately after `start()` doesn't block on a tick that hasn't
    /// started yet.
    pub async fn wait_for_start_or_cancel(cancel: &Notify) {
        tokio::select! {
            _ = cancel.notified() => {}
            _ = tokio::time::sleep(INITIAL_DELAY) => {}
        }
    }

    /// Signals cancellation and waits for the current tick to finish, up
    /// to [`STOP_TIMEOUT`]; past that, the task is aborted.
    pub async fn stop(self) {
        self.cancel.notify_one();
        let abort_handle = self.join.abort_handle();
        match tokio::time::timeout(STOP_TIMEOUT, self.join).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(worker = self.name, error = %err, "worker task panicked while stopping"),
            Err(_) => {
                tracing::warn!(worker = self.name, "worker did not stop within timeout, aborting");
                abort_handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn stop_drains_a_loop_that_honors_cancellation() {
        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = ran.clone();
        let handle = WorkerHandle::start("test", move |cancel: Arc<Notify>| async move {
            ran_clone.store(true, Ordering::SeqCst);
            cancel.notified().await;
        });
        handle.stop().await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn stop_aborts_a_loop_that_ignores_cancellation() {
        let handle = WorkerHandle::start("stuck", |_cancel: Arc<Notify>| async move {
            loop {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        });
        tokio::time::timeout(Duration::from_secs(10), handle.stop())
            .await
            .expect("stop() must return within STOP_TIMEOUT even for a stuck worker");
    }
}
