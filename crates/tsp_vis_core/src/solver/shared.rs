use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use crate::Tour;

/// State visible to both the controlling side and the worker.
///
/// Flags are plain atomics; the tour travels through a single-slot mailbox
/// holding the latest complete snapshot.
#[derive(Debug, Default)]
pub(crate) struct SharedState {
    solving: AtomicBool,
    interrupt: AtomicBool,
    pacing_ms: AtomicU64,
    snapshot: Mutex<Arc<Tour>>,
}

impl SharedState {
    pub(crate) fn new(tour: Tour, pacing_ms: u64) -> Self {
        Self {
            solving: AtomicBool::new(false),
            interrupt: AtomicBool::new(false),
            pacing_ms: AtomicU64::new(pacing_ms),
            snapshot: Mutex::new(Arc::new(tour)),
        }
    }

    pub(crate) fn is_solving(&self) -> bool {
        self.solving.load(Ordering::Acquire)
    }

    pub(crate) fn set_solving(&self, solving: bool) {
        self.solving.store(solving, Ordering::Release);
    }

    pub(crate) fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Acquire)
    }

    pub(crate) fn request_interrupt(&self) {
        self.interrupt.store(true, Ordering::Release);
    }

    pub(crate) fn clear_interrupt(&self) {
        self.interrupt.store(false, Ordering::Release);
    }

    pub(crate) fn pacing_ms(&self) -> u64 {
        self.pacing_ms.load(Ordering::Relaxed)
    }

    pub(crate) fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms())
    }

    pub(crate) fn set_pacing_ms(&self, ms: u64) {
        self.pacing_ms.store(ms, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> Arc<Tour> {
        Arc::clone(&self.slot())
    }

    /// Copies `tour` into the mailbox, replacing the previous snapshot.
    pub(crate) fn publish(&self, tour: &Tour) {
        let next = Arc::new(tour.clone());
        *self.slot() = next;
    }

    pub(crate) fn replace(&self, tour: Tour) {
        *self.slot() = Arc::new(tour);
    }

    // A panicking writer only ever leaves a whole `Arc` behind.
    fn slot(&self) -> MutexGuard<'_, Arc<Tour>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the solving flag when the worker leaves, however it leaves.
pub(crate) struct SolvingGuard<'a>(pub(crate) &'a SharedState);

impl Drop for SolvingGuard<'_> {
    fn drop(&mut self) {
        self.0.set_solving(false);
    }
}
