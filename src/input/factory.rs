//! Registration of wrapped pointer-event listeners.
//!
//! One generic factory serves both raw-event families: it is parameterized
//! by the [`PointerKindSet`] it binds to and exposed as two preconfigured
//! instantiations, [`PointerEventFactory::mouse`] and
//! [`PointerEventFactory::pointer`].

use std::rc::Rc;
use std::time::Duration;

use crate::host::{ElementRef, RawEventKind, Scheduler, Subscription};
use crate::input::event::WrappedPointerEvent;
use crate::input::throttle::Throttled;

/// The raw-event kinds one event family binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerKindSet {
    pub down: RawEventKind,
    pub up: RawEventKind,
    pub movement: RawEventKind,
    pub out: RawEventKind,
    pub context_menu: RawEventKind,
}

/// Mouse-style event kinds.
pub const MOUSE_KINDS: PointerKindSet = PointerKindSet {
    down: RawEventKind::MouseDown,
    up: RawEventKind::MouseUp,
    movement: RawEventKind::MouseMove,
    out: RawEventKind::MouseOut,
    context_menu: RawEventKind::ContextMenu,
};

/// Pointer-style event kinds.
pub const POINTER_KINDS: PointerKindSet = PointerKindSet {
    down: RawEventKind::PointerDown,
    up: RawEventKind::PointerUp,
    movement: RawEventKind::PointerMove,
    out: RawEventKind::PointerOut,
    context_menu: RawEventKind::ContextMenu,
};

/// Registers listeners on target elements and delivers events wrapped
/// against the editor root, so consumers always see editor-relative
/// coordinates.
pub struct PointerEventFactory {
    view: ElementRef,
    scheduler: Rc<dyn Scheduler>,
    kinds: PointerKindSet,
}

impl PointerEventFactory {
    /// A factory bound to the mouse-style event family.
    pub fn mouse(view: ElementRef, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_kinds(view, scheduler, MOUSE_KINDS)
    }

    /// A factory bound to the pointer-style event family.
    pub fn pointer(view: ElementRef, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_kinds(view, scheduler, POINTER_KINDS)
    }

    pub fn with_kinds(view: ElementRef, scheduler: Rc<dyn Scheduler>, kinds: PointerKindSet) -> Self {
        Self {
            view,
            scheduler,
            kinds,
        }
    }

    /// The raw-event kinds this factory binds to.
    pub fn kinds(&self) -> PointerKindSet {
        self.kinds
    }

    pub fn on_down(
        &self,
        target: &ElementRef,
        callback: impl Fn(WrappedPointerEvent) + 'static,
    ) -> Subscription {
        self.listen(target, self.kinds.down, callback)
    }

    pub fn on_up(
        &self,
        target: &ElementRef,
        callback: impl Fn(WrappedPointerEvent) + 'static,
    ) -> Subscription {
        self.listen(target, self.kinds.up, callback)
    }

    pub fn on_context_menu(
        &self,
        target: &ElementRef,
        callback: impl Fn(WrappedPointerEvent) + 'static,
    ) -> Subscription {
        self.listen(target, self.kinds.context_menu, callback)
    }

    /// Register a leave listener that ignores "bubbling" transitions: when
    /// the pointer moves from `target` onto one of its own descendants the
    /// surface still reports an out event, but the pointer never left the
    /// target, so no callback fires.
    pub fn on_leave(
        &self,
        target: &ElementRef,
        callback: impl Fn(WrappedPointerEvent) + 'static,
    ) -> Subscription {
        let view = Rc::clone(&self.view);
        let owner = Rc::clone(target);
        target.add_pointer_listener(
            self.kinds.out,
            Rc::new(move |raw| {
                if let Some(related) = &raw.related_target {
                    if owner.contains(related) {
                        return;
                    }
                }
                callback(WrappedPointerEvent::wrap(raw.clone(), &view));
            }),
        )
    }

    /// Register a throttled move listener.
    ///
    /// Raw moves are wrapped, then folded left-to-right into a payload with
    /// `merge`; at most one `callback` fires per `interval`, trailing edge,
    /// carrying the accumulated payload. Canceling the subscription also
    /// drops any payload still awaiting delivery.
    pub fn on_move_throttled<R: 'static>(
        &self,
        target: &ElementRef,
        interval: Duration,
        merge: impl Fn(Option<R>, WrappedPointerEvent) -> R + 'static,
        callback: impl Fn(R) + 'static,
    ) -> Subscription {
        let throttled = Rc::new(Throttled::new(
            Rc::clone(&self.scheduler),
            interval,
            merge,
            callback,
        ));

        let view = Rc::clone(&self.view);
        let ingest = Rc::clone(&throttled);
        let mut listener = target.add_pointer_listener(
            self.kinds.movement,
            Rc::new(move |raw| ingest.ingest(WrappedPointerEvent::wrap(raw.clone(), &view))),
        );

        Subscription::new(move || {
            listener.cancel();
            throttled.cancel_pending();
        })
    }

    fn listen(
        &self,
        target: &ElementRef,
        kind: RawEventKind,
        callback: impl Fn(WrappedPointerEvent) + 'static,
    ) -> Subscription {
        let view = Rc::clone(&self.view);
        target.add_pointer_listener(
            kind,
            Rc::new(move |raw| callback(WrappedPointerEvent::wrap(raw.clone(), &view))),
        )
    }
}
