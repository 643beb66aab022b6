//! Cooperative repeating-task scheduling.
//!
//! The contract: a repeating task that, after each run, reports the delay
//! until its next run; reporting `None` cancels further runs. Cancellation
//! from outside prevents any further runs but never interrupts a run already
//! in flight — that run completes first.
//!
//! Implemented as a single worker thread blocking on a channel with a
//! timeout (a one-slot delay queue). No global callback registry: each
//! [`Scheduler`] owns its thread and its cancel handle.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct Scheduler {
    cancel: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawns a repeating task. The first run happens after `first_delay`;
    /// each subsequent delay is whatever the previous run returned.
    pub fn spawn<F>(first_delay: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Option<Duration> + Send + 'static,
    {
        let (cancel, signal) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let mut delay = first_delay;
            loop {
                match signal.recv_timeout(delay) {
                    // Explicit cancel, or the owning handle was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                    Err(RecvTimeoutError::Timeout) => {}
                }
                match task() {
                    Some(next) => delay = next,
                    None => return,
                }
            }
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Prevents further runs and blocks until the worker thread exits. A run
    /// in flight completes normally first.
    pub fn stop(mut self) {
        let _ = self.cancel.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Non-blocking: the worker sees the signal (or the disconnect) at its
        // next wakeup and exits.
        let _ = self.cancel.send(());
    }
}
