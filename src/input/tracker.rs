//! Document-level pointer tracking for the lifetime of a gesture.
//!
//! Once a gesture starts inside the widget, movement must keep being
//! observed after the pointer leaves the widget's own bounds. The tracker
//! listens at the document level, coalesces moves with the throttled-merge
//! discipline, and ends when the initiating buttons are released or when it
//! is stopped explicitly. The drag monitor orchestrates this primitive; it
//! does not deliver events of its own.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::host::{Buttons, ElementRef, RawPointerEvent, Scheduler, Subscription};
use crate::input::factory::PointerKindSet;
use crate::input::throttle::Throttled;

struct TrackingSession {
    origin: ElementRef,
    /// Move + up listeners; dropping them deregisters and cancels any
    /// pending throttled delivery.
    subscriptions: Vec<Subscription>,
    on_stop: Box<dyn FnOnce(Option<RawPointerEvent>)>,
}

enum TrackerState {
    Idle,
    Tracking(TrackingSession),
}

/// Tracks pointer movement globally for the duration of one gesture.
pub struct GlobalMoveTracker {
    document: ElementRef,
    scheduler: Rc<dyn Scheduler>,
    kinds: PointerKindSet,
    state: Rc<RefCell<TrackerState>>,
}

impl GlobalMoveTracker {
    pub fn new(document: ElementRef, scheduler: Rc<dyn Scheduler>, kinds: PointerKindSet) -> Self {
        Self {
            document,
            scheduler,
            kinds,
            state: Rc::new(RefCell::new(TrackerState::Idle)),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(*self.state.borrow(), TrackerState::Tracking(_))
    }

    /// Begin tracking a gesture initiated on `origin` with `initial_buttons`
    /// held.
    ///
    /// Raw moves are folded into payloads with `merge` and delivered through
    /// `on_move`, throttled by `interval`. The session ends - and `on_stop`
    /// fires exactly once, with the terminating event if one exists - when
    /// the initiating buttons are released or [`stop`](Self::stop) is called.
    pub fn start<R: 'static>(
        &self,
        origin: &ElementRef,
        initial_buttons: Buttons,
        interval: Duration,
        merge: impl Fn(Option<R>, RawPointerEvent) -> R + 'static,
        on_move: impl Fn(R) + 'static,
        on_stop: impl FnOnce(Option<RawPointerEvent>) + 'static,
    ) -> Result<()> {
        if self.is_tracking() {
            return Err(Error::AlreadyMonitoring);
        }

        origin.set_pointer_capture();

        let throttled = Rc::new(Throttled::new(
            Rc::clone(&self.scheduler),
            interval,
            merge,
            on_move,
        ));

        let move_listener = {
            let state = Rc::clone(&self.state);
            let throttled = Rc::clone(&throttled);
            self.document.add_pointer_listener(
                self.kinds.movement,
                Rc::new(move |raw| {
                    // A move without the initiating buttons means the release
                    // happened where we could not observe it.
                    if !raw.buttons.contains(initial_buttons) {
                        Self::finish(&state, Some(raw.clone()));
                    } else {
                        throttled.ingest(raw.clone());
                    }
                }),
            )
        };
        let move_subscription = Subscription::new({
            let mut listener = move_listener;
            move || {
                listener.cancel();
                throttled.cancel_pending();
            }
        });

        let up_subscription = {
            let state = Rc::clone(&self.state);
            self.document.add_pointer_listener(
                self.kinds.up,
                Rc::new(move |raw| Self::finish(&state, Some(raw.clone()))),
            )
        };

        *self.state.borrow_mut() = TrackerState::Tracking(TrackingSession {
            origin: Rc::clone(origin),
            subscriptions: vec![move_subscription, up_subscription],
            on_stop: Box::new(on_stop),
        });
        debug!("global move tracking started");
        Ok(())
    }

    /// End the session, passing `event` through to `on_stop`. No-op when
    /// idle.
    pub fn stop(&self, event: Option<RawPointerEvent>) {
        Self::finish(&self.state, event);
    }

    /// The single teardown path for every way a session can end.
    fn finish(state: &Rc<RefCell<TrackerState>>, event: Option<RawPointerEvent>) {
        let session = match std::mem::replace(&mut *state.borrow_mut(), TrackerState::Idle) {
            TrackerState::Tracking(session) => session,
            TrackerState::Idle => return,
        };

        // Deregister listeners and drop any pending throttled payload before
        // the stop callback runs, so no further moves can be observed.
        drop(session.subscriptions);
        session.origin.release_pointer_capture();
        debug!(terminated_by_event = event.is_some(), "global move tracking stopped");

        (session.on_stop)(event);
    }
}
