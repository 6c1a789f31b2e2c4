//! Deferred-work scheduling against the host's event loop.
//!
//! All deferred work in this crate (throttled move delivery, the style-rule
//! garbage-collection sweep) is expressed as cancelable one-shot timers.
//! Control returns to the caller immediately; the callback runs as a later
//! turn of the host's single logical thread.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// One-shot timer scheduling provided by the host environment.
///
/// Implementations must deliver callbacks asynchronously (never from inside
/// `set_timeout` itself) and on the same logical thread that scheduled them.
pub trait Scheduler {
    /// The host's current monotonic time.
    fn now(&self) -> Instant;

    /// Schedule `callback` to run once after `delay`.
    ///
    /// Canceling a timer that has already fired must be a no-op.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Cancelation handle for a scheduled timer.
///
/// Dropping the handle cancels the timer; [`cancel`](TimerHandle::cancel) is
/// idempotent.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    /// Create a handle that runs `cancel` to revoke the timer.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Revoke the timer if it has not fired yet. No-op otherwise.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A reschedulable single-shot runner.
///
/// Each [`schedule`](Debouncer::schedule) call resets the countdown: the
/// callback runs once, `delay` after the most recent call. Used to debounce
/// the style-rule garbage-collection sweep behind bursts of lease releases.
#[derive(Clone)]
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay: Duration,
    callback: Rc<dyn Fn()>,
    pending: Rc<RefCell<Option<TimerHandle>>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay: Duration, callback: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            delay,
            callback: Rc::new(callback),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// (Re)start the countdown from now.
    pub fn schedule(&self) {
        let mut pending = self.pending.borrow_mut();
        if let Some(mut handle) = pending.take() {
            handle.cancel();
        }

        let callback = Rc::clone(&self.callback);
        let slot = Rc::clone(&self.pending);
        *pending = Some(self.scheduler.set_timeout(
            self.delay,
            Box::new(move || {
                // Drop our own fired handle before running, so the callback
                // observes an unscheduled debouncer and may reschedule.
                slot.borrow_mut().take();
                callback();
            }),
        ));
    }

    /// Revoke any pending run.
    pub fn cancel(&self) {
        if let Some(mut handle) = self.pending.borrow_mut().take() {
            handle.cancel();
        }
    }

    /// Whether a run is currently pending.
    pub fn is_scheduled(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("scheduled", &self.is_scheduled())
            .finish()
    }
}
