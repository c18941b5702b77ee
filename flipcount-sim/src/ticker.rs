//! Cancellable wall-clock tick source for interactive runs.
//!
//! The simulator itself never sleeps; it drives ticks synchronously against
//! a mock clock. Interactive mode instead spawns a `Ticker` that invokes a
//! callback on a fixed interval until its handle is cancelled. A single
//! ticker drives a single panel: starting a new mode does not start a new
//! ticker, it only changes what the next tick does. After [`cancel`]
//! returns, no further callback invocation can occur.
//!
//! [`cancel`]: TickerHandle::cancel

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running ticker; cancelling it stops the tick stream.
#[derive(Debug)]
pub struct TickerHandle {
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stops the tick stream and waits for the worker to exit.
    ///
    /// Idempotent. Once this returns, the callback will never run again.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawns a ticker invoking `on_tick` every `interval` until cancelled.
///
/// # Parameters
/// - `interval`: Delay between consecutive ticks.
/// - `on_tick`: Callback run once per tick on the ticker thread.
///
/// # Returns
/// A [`TickerHandle`] owning the tick stream.
pub fn spawn(interval: Duration, mut on_tick: impl FnMut() + Send + 'static) -> TickerHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    let worker = thread::spawn(move || {
        while !flag.load(Ordering::SeqCst) {
            thread::sleep(interval);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            on_tick();
        }
    });

    TickerHandle {
        cancelled,
        worker: Some(worker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn ticker_fires_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let observed = count.clone();
        let mut handle = spawn(Duration::from_millis(2), move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(100));
        handle.cancel();
        let at_cancel = count.load(Ordering::SeqCst);
        assert!(at_cancel > 0, "ticker never fired");

        // No tick may land after cancel() has returned.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), at_cancel);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut handle = spawn(Duration::from_millis(1), || {});
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
