//! One-shot readiness handshake between the audio thread and the UI thread.
//!
//! The audio thread builds its internals, then calls `signal_ready` with
//! whatever the UI side needs from them. The UI thread blocks in
//! `await_ready` until that happens. The first signal wins; later ones are
//! ignored, and waiting after the signal returns immediately.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Condvar, Mutex, MutexGuard, PoisonError,
};
use std::time::Duration;

pub struct StartupBarrier<T = ()> {
    value: Mutex<Option<T>>,
    signalled: Condvar,
    ready: AtomicBool,
}

impl<T: Clone> StartupBarrier<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
            signalled: Condvar::new(),
            ready: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // A panicking signaller cannot leave the Option half-written
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `value` and wake every waiter.
    ///
    /// Returns true for the first signal only.
    pub fn signal_ready(&self, value: T) -> bool {
        let mut slot = self.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        self.ready.store(true, Ordering::Release);
        self.signalled.notify_all();
        true
    }

    /// Block until signalled, then return a copy of the signalled value.
    pub fn await_ready(&self) -> T {
        let mut guard = self.lock();
        loop {
            if let Some(value) = guard.as_ref() {
                return value.clone();
            }
            guard = self
                .signalled
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`await_ready`](Self::await_ready), giving up after `timeout`.
    pub fn await_ready_timeout(&self, timeout: Duration) -> Option<T> {
        let (guard, _) = self
            .signalled
            .wait_timeout_while(self.lock(), timeout, |slot| slot.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Non-blocking check.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl<T: Clone> Default for StartupBarrier<T> {
    fn default() -> Self {
        Self::new()
    }
}
