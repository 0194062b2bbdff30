//! Continuous iteration as a cancellable repeating task.
//!
//! One suspension point per iteration (the delay). Stopping is cooperative:
//! the flag is checked after every sleep, so a stop takes effect before the
//! next step runs. Starting again invalidates any task still sleeping from an
//! earlier run.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Something the runner can advance one iteration at a time.
pub trait Steppable {
    /// Runs one iteration. Returns `false` once there is nothing more to do.
    fn advance(&mut self) -> bool;
}

#[derive(Debug)]
struct Inner {
    running: AtomicBool,
    epoch: AtomicU64,
    delay_ms: AtomicU64,
}

/// Shared run flag and delay. Clones control the same run.
#[derive(Debug, Clone)]
pub struct RunControl {
    inner: Arc<Inner>,
}

impl RunControl {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                running: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
                delay_ms: AtomicU64::new(delay.as_millis() as u64),
            }),
        }
    }

    /// Sets the run flag and starts a new run epoch.
    pub fn start(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.running.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.inner.delay_ms.load(Ordering::Relaxed))
    }

    /// Takes effect from the next sleep on.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.delay_ms.store(delay.as_millis() as u64, Ordering::Relaxed);
    }

    fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.is_running() && self.epoch() == epoch
    }
}

/// Advances `state` every `control.delay()` until the run is stopped or the
/// state reports it is done. Resolves to the number of iterations performed.
///
/// The run epoch is captured when this is called, not when the future is
/// first polled. The lock is taken only around `advance`, never across the sleep.
pub fn run_shared<S>(state: Arc<Mutex<S>>, control: RunControl) -> impl Future<Output = usize>
where
    S: Steppable + Send,
{
    let epoch = control.epoch();
    async move {
        let mut steps = 0;
        while control.is_current(epoch) {
            tokio::time::sleep(control.delay()).await;
            if !control.is_current(epoch) {
                break;
            }
            let keep_going = {
                let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                guard.advance()
            };
            steps += 1;
            if !keep_going {
                control.stop();
                break;
            }
        }
        log::debug!("run {epoch} finished after {steps} iterations");
        steps
    }
}
