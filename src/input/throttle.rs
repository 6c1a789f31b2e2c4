//! Throttled-merge event delivery.
//!
//! High-frequency pointer-move floods are coalesced: events arriving within
//! the minimum interval are folded together with a caller-supplied merge
//! function, and at most one callback fires per interval, on the trailing
//! edge. The newest position is always preserved by the merge.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::host::{Scheduler, TimerHandle};
use crate::profile_scope;

struct ThrottleState<R> {
    pending: Option<R>,
    last_delivery: Option<Instant>,
    timer: Option<TimerHandle>,
}

/// Coalesces a stream of `I` inputs into throttled `R` payloads.
///
/// Each input is folded into the pending payload via the merge function
/// (`merge(pending, input) -> payload`); a one-shot timer delivers the
/// accumulated payload once the interval has elapsed since the previous
/// delivery. Delivery order follows input order; only the count is reduced.
pub struct Throttled<I, R> {
    scheduler: Rc<dyn Scheduler>,
    interval: Duration,
    merge: Box<dyn Fn(Option<R>, I) -> R>,
    deliver: Rc<dyn Fn(R)>,
    state: Rc<RefCell<ThrottleState<R>>>,
}

impl<I, R: 'static> Throttled<I, R> {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        interval: Duration,
        merge: impl Fn(Option<R>, I) -> R + 'static,
        deliver: impl Fn(R) + 'static,
    ) -> Self {
        Self {
            scheduler,
            interval,
            merge: Box::new(merge),
            deliver: Rc::new(deliver),
            state: Rc::new(RefCell::new(ThrottleState {
                pending: None,
                last_delivery: None,
                timer: None,
            })),
        }
    }

    /// Fold `input` into the pending payload and ensure a delivery is
    /// scheduled.
    pub fn ingest(&self, input: I) {
        let mut state = self.state.borrow_mut();
        let merged = (self.merge)(state.pending.take(), input);
        state.pending = Some(merged);

        if state.timer.is_none() {
            let delay = match state.last_delivery {
                Some(at) => self
                    .interval
                    .saturating_sub(self.scheduler.now().saturating_duration_since(at)),
                None => self.interval,
            };

            let shared = Rc::clone(&self.state);
            let deliver = Rc::clone(&self.deliver);
            let scheduler = Rc::clone(&self.scheduler);
            state.timer = Some(self.scheduler.set_timeout(
                delay,
                Box::new(move || {
                    profile_scope!("throttled_delivery");

                    // Borrow is released before the callback runs, so the
                    // callback may ingest further events or cancel.
                    let payload = {
                        let mut state = shared.borrow_mut();
                        state.timer = None;
                        state.last_delivery = Some(scheduler.now());
                        state.pending.take()
                    };

                    if let Some(payload) = payload {
                        trace!("delivering throttled payload");
                        deliver(payload);
                    }
                }),
            ));
        }
    }

    /// Drop the pending payload and revoke the scheduled delivery.
    pub fn cancel_pending(&self) {
        let mut state = self.state.borrow_mut();
        state.pending = None;
        if let Some(mut timer) = state.timer.take() {
            timer.cancel();
        }
    }
}
