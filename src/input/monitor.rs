//! Cancelable global drag monitoring.
//!
//! A two-state machine, Idle -> Monitoring -> Idle, layered on the global
//! move tracker. While monitoring, a capture-phase keyboard listener ends
//! the session on any non-modifier key press (user-initiated cancellation);
//! modifier-only presses are ignored so Shift/Ctrl may be held during a
//! drag. All termination paths - button release, cancel key, explicit stop -
//! route through one teardown function, the keyboard listener is disposed
//! before `on_stop` fires, and `on_stop` fires at most once per session.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::constants::MONITOR_MOVE_THROTTLE;
use crate::error::{Error, Result};
use crate::host::{Buttons, ElementRef, RawKeyEvent, RawPointerEvent, Scheduler, Subscription};
use crate::input::event::WrappedPointerEvent;
use crate::input::factory::PointerKindSet;
use crate::input::tracker::GlobalMoveTracker;

/// The raw event that terminated a drag session, letting callers tell a
/// release-triggered ending from a cancel-triggered one. `None` means the
/// caller stopped the session explicitly.
#[derive(Debug, Clone)]
pub enum StopEvent {
    /// The initiating button was released.
    ButtonRelease(RawPointerEvent),
    /// A non-modifier key press canceled the gesture.
    Canceled(RawKeyEvent),
}

impl StopEvent {
    pub fn was_canceled(&self) -> bool {
        matches!(self, StopEvent::Canceled(_))
    }
}

enum MonitorState {
    Idle,
    Monitoring {
        /// Capture-phase keydown listener; torn down before `on_stop`.
        keydown: Subscription,
    },
}

/// Tracks pointer movement beyond the widget's bounds for the duration of a
/// drag gesture, with keyboard-driven early cancellation.
pub struct GlobalDragMonitor {
    view: ElementRef,
    document: ElementRef,
    tracker: Rc<GlobalMoveTracker>,
    state: Rc<RefCell<MonitorState>>,
}

impl GlobalDragMonitor {
    pub fn new(
        view: ElementRef,
        document: ElementRef,
        scheduler: Rc<dyn Scheduler>,
        kinds: PointerKindSet,
    ) -> Self {
        let tracker = Rc::new(GlobalMoveTracker::new(
            Rc::clone(&document),
            scheduler,
            kinds,
        ));
        Self {
            view,
            document,
            tracker,
            state: Rc::new(RefCell::new(MonitorState::Idle)),
        }
    }

    pub fn is_monitoring(&self) -> bool {
        matches!(*self.state.borrow(), MonitorState::Monitoring { .. })
    }

    /// Transition Idle -> Monitoring.
    ///
    /// Moves are wrapped against the editor root, folded with `merge` under
    /// the throttled-merge discipline, and delivered through `on_move` in
    /// event order (coalesced, never reordered). Starting while already
    /// monitoring is a caller error and is rejected.
    pub fn start_monitoring<R: 'static>(
        &self,
        initial_target: &ElementRef,
        initial_buttons: Buttons,
        merge: impl Fn(Option<R>, WrappedPointerEvent) -> R + 'static,
        on_move: impl Fn(R) + 'static,
        on_stop: impl FnOnce(Option<StopEvent>) + 'static,
    ) -> Result<()> {
        if self.is_monitoring() {
            return Err(Error::AlreadyMonitoring);
        }

        // Cancel reason stashed by the keydown listener so the stop bridge
        // can report it; the tracker itself only knows about pointer events.
        let cancel_key: Rc<RefCell<Option<RawKeyEvent>>> = Rc::new(RefCell::new(None));

        let keydown = self.document.add_key_listener(true, {
            let tracker = Rc::clone(&self.tracker);
            let cancel_key = Rc::clone(&cancel_key);
            Rc::new(move |key_event: &RawKeyEvent| {
                if key_event.key.is_modifier() {
                    return;
                }
                *cancel_key.borrow_mut() = Some(*key_event);
                tracker.stop(None);
            })
        });

        let view = Rc::clone(&self.view);
        let wrapping_merge = move |last: Option<R>, raw: RawPointerEvent| {
            merge(last, WrappedPointerEvent::wrap(raw, &view))
        };

        let stop_bridge = {
            let state = Rc::clone(&self.state);
            move |pointer_event: Option<RawPointerEvent>| {
                // Dispose the keyboard listener before the caller observes
                // the stop.
                if let Some(mut keydown) = Self::transition_to_idle(&state) {
                    keydown.cancel();
                }

                let reason = cancel_key
                    .borrow_mut()
                    .take()
                    .map(StopEvent::Canceled)
                    .or(pointer_event.map(StopEvent::ButtonRelease));
                debug!(reason = reason_label(&reason), "drag session ended");
                on_stop(reason);
            }
        };

        match self.tracker.start(
            initial_target,
            initial_buttons,
            MONITOR_MOVE_THROTTLE,
            wrapping_merge,
            on_move,
            stop_bridge,
        ) {
            Ok(()) => {}
            Err(err) => {
                // Keydown listener was never part of a session; drop it.
                drop(keydown);
                return Err(err);
            }
        }

        *self.state.borrow_mut() = MonitorState::Monitoring { keydown };
        debug!(buttons = ?initial_buttons, "drag session started");
        Ok(())
    }

    /// Transition Monitoring -> Idle. Safe to call when already Idle.
    ///
    /// `on_stop` receives `None`: the ending was requested by the caller,
    /// not triggered by an input event.
    pub fn stop_monitoring(&self) {
        self.tracker.stop(None);
    }

    /// The single state-transition point out of Monitoring.
    fn transition_to_idle(state: &Rc<RefCell<MonitorState>>) -> Option<Subscription> {
        match std::mem::replace(&mut *state.borrow_mut(), MonitorState::Idle) {
            MonitorState::Monitoring { keydown } => Some(keydown),
            MonitorState::Idle => None,
        }
    }
}

fn reason_label(reason: &Option<StopEvent>) -> &'static str {
    match reason {
        Some(StopEvent::ButtonRelease(_)) => "button-release",
        Some(StopEvent::Canceled(_)) => "canceled",
        None => "explicit-stop",
    }
}
