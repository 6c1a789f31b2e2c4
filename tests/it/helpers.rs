//! Test helpers: fake host implementations and event builders.
//!
//! This module provides:
//! - `FakeScheduler` - manual-clock scheduler with deterministic `advance`
//! - `FakeElement` - an element tree with dispatchable listeners
//! - `FakeStyleHost` - records injected style nodes and their removal
//! - `TestSurface` - a ready-made document/view pair
//! - raw-event and property-set builders

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use glasspane::geometry::{Rect, Size};
use glasspane::host::element::{Element, ElementRef, NodeId};
use glasspane::host::events::{
    Buttons, Key, KeyListener, PointerListener, RawEventKind, RawKeyEvent, RawPointerEvent,
};
use glasspane::host::scheduler::{Scheduler, TimerHandle};
use glasspane::host::style::{StyleInjector, StyleNode};
use glasspane::host::subscription::Subscription;
use glasspane::style::rules::{CssProperties, CssValue};
use once_cell::sync::Lazy;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

static LOGGING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Install a test log subscriber once per process.
pub fn init_logging() {
    Lazy::force(&LOGGING);
}

// ============================================================================
// FakeScheduler - manual-clock timers
// ============================================================================

struct FakeTimer {
    id: u64,
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

struct FakeSchedulerInner {
    offset: Duration,
    next_id: u64,
    timers: Vec<FakeTimer>,
}

/// A scheduler whose clock only moves when the test calls
/// [`advance`](FakeScheduler::advance). Timers fire in deadline order, and
/// callbacks may schedule or cancel further timers while running.
pub struct FakeScheduler {
    epoch: Instant,
    inner: Rc<RefCell<FakeSchedulerInner>>,
}

impl FakeScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            epoch: Instant::now(),
            inner: Rc::new(RefCell::new(FakeSchedulerInner {
                offset: Duration::ZERO,
                next_id: 0,
                timers: Vec::new(),
            })),
        })
    }

    /// Move the clock forward by `step`, running every timer that becomes
    /// due along the way.
    pub fn advance(&self, step: Duration) {
        let target = self.inner.borrow().offset + step;
        loop {
            let next = {
                let inner = self.inner.borrow();
                inner
                    .timers
                    .iter()
                    .filter(|timer| timer.deadline <= target)
                    .min_by_key(|timer| (timer.deadline, timer.id))
                    .map(|timer| timer.id)
            };
            let Some(id) = next else { break };

            let timer = {
                let mut inner = self.inner.borrow_mut();
                let index = inner
                    .timers
                    .iter()
                    .position(|timer| timer.id == id)
                    .expect("timer vanished between borrows");
                let timer = inner.timers.swap_remove(index);
                inner.offset = inner.offset.max(timer.deadline);
                timer
            };
            (timer.callback)();
        }
        self.inner.borrow_mut().offset = target;
    }

    pub fn pending_timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

impl Scheduler for FakeScheduler {
    fn now(&self) -> Instant {
        self.epoch + self.inner.borrow().offset
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline = inner.offset + delay;
        inner.timers.push(FakeTimer {
            id,
            deadline,
            callback,
        });

        let registry = Rc::clone(&self.inner);
        TimerHandle::new(move || {
            registry.borrow_mut().timers.retain(|timer| timer.id != id);
        })
    }
}

// ============================================================================
// FakeElement - element tree with dispatchable listeners
// ============================================================================

struct ListenerSet {
    next_id: u64,
    pointer: Vec<(u64, RawEventKind, PointerListener)>,
    key: Vec<(u64, bool, KeyListener)>,
}

/// An element of a fake surface tree. Geometry is mutable so tests can move
/// or rescale the editor between events.
pub struct FakeElement {
    id: u64,
    rect: Cell<Rect>,
    offset_size: Cell<Size>,
    in_shadow: Cell<bool>,
    children: RefCell<Vec<Rc<FakeElement>>>,
    listeners: Rc<RefCell<ListenerSet>>,
    pointer_captured: Cell<bool>,
}

impl FakeElement {
    pub fn new(rect: Rect, offset_size: Size) -> Rc<Self> {
        Rc::new(Self {
            id: NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
            rect: Cell::new(rect),
            offset_size: Cell::new(offset_size),
            in_shadow: Cell::new(false),
            children: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(ListenerSet {
                next_id: 0,
                pointer: Vec::new(),
                key: Vec::new(),
            })),
            pointer_captured: Cell::new(false),
        })
    }

    /// An untransformed element: rendered and offset sizes agree.
    pub fn unscaled(x: f64, y: f64, width: f64, height: f64) -> Rc<Self> {
        Self::new(Rect::new(x, y, width, height), Size::new(width, height))
    }

    pub fn add_child(&self, child: Rc<FakeElement>) {
        self.children.borrow_mut().push(child);
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub fn set_offset_size(&self, size: Size) {
        self.offset_size.set(size);
    }

    pub fn set_in_shadow_root(&self, in_shadow: bool) {
        self.in_shadow.set(in_shadow);
    }

    /// Deliver a raw pointer event to every matching listener. Listeners
    /// registered or removed during dispatch take effect on the next
    /// dispatch.
    pub fn dispatch_pointer(&self, event: RawPointerEvent) {
        let listeners: Vec<PointerListener> = self
            .listeners
            .borrow()
            .pointer
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    /// Deliver a raw key event, capture-phase listeners first.
    pub fn dispatch_key(&self, event: RawKeyEvent) {
        let mut listeners: Vec<(bool, KeyListener)> = self
            .listeners
            .borrow()
            .key
            .iter()
            .map(|(_, capture, listener)| (*capture, Rc::clone(listener)))
            .collect();
        listeners.sort_by_key(|(capture, _)| !*capture);
        for (_, listener) in listeners {
            listener(&event);
        }
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.listeners.borrow().pointer.len()
    }

    pub fn key_listener_count(&self) -> usize {
        self.listeners.borrow().key.len()
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured.get()
    }
}

impl Element for FakeElement {
    fn node_id(&self) -> NodeId {
        NodeId(self.id)
    }

    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn offset_size(&self) -> Size {
        self.offset_size.get()
    }

    fn contains(&self, other: &ElementRef) -> bool {
        if NodeId(self.id) == other.node_id() {
            return true;
        }
        self.children
            .borrow()
            .iter()
            .any(|child| Element::contains(child.as_ref(), other))
    }

    fn is_in_shadow_root(&self) -> bool {
        self.in_shadow.get()
    }

    fn add_pointer_listener(&self, kind: RawEventKind, listener: PointerListener) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.pointer.push((id, kind, listener));

        let registry = Rc::clone(&self.listeners);
        Subscription::new(move || {
            registry
                .borrow_mut()
                .pointer
                .retain(|(listener_id, _, _)| *listener_id != id);
        })
    }

    fn add_key_listener(&self, capture: bool, listener: KeyListener) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.key.push((id, capture, listener));

        let registry = Rc::clone(&self.listeners);
        Subscription::new(move || {
            registry
                .borrow_mut()
                .key
                .retain(|(listener_id, _, _)| *listener_id != id);
        })
    }

    fn set_pointer_capture(&self) {
        self.pointer_captured.set(true);
    }

    fn release_pointer_capture(&self) {
        self.pointer_captured.set(false);
    }
}

// ============================================================================
// FakeStyleHost - records injected style nodes
// ============================================================================

pub struct FakeStyleNode {
    pub text: RefCell<String>,
    pub removed: Cell<bool>,
    pub container: Option<NodeId>,
}

impl StyleNode for FakeStyleNode {
    fn set_text(&self, css: &str) {
        *self.text.borrow_mut() = css.to_string();
    }

    fn remove(&self) {
        self.removed.set(true);
    }
}

#[derive(Default)]
pub struct FakeStyleHost {
    nodes: RefCell<Vec<Rc<FakeStyleNode>>>,
}

impl FakeStyleHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Every node ever injected, removed or not.
    pub fn nodes(&self) -> Vec<Rc<FakeStyleNode>> {
        self.nodes.borrow().clone()
    }

    pub fn live_nodes(&self) -> Vec<Rc<FakeStyleNode>> {
        self.nodes
            .borrow()
            .iter()
            .filter(|node| !node.removed.get())
            .cloned()
            .collect()
    }

    pub fn live_node_count(&self) -> usize {
        self.live_nodes().len()
    }
}

impl StyleInjector for FakeStyleHost {
    fn create_style_node(&self, container: Option<&ElementRef>) -> Rc<dyn StyleNode> {
        let node = Rc::new(FakeStyleNode {
            text: RefCell::new(String::new()),
            removed: Cell::new(false),
            container: container.map(|element| element.node_id()),
        });
        self.nodes.borrow_mut().push(Rc::clone(&node));
        node
    }
}

// ============================================================================
// TestSurface - ready-made document/view pair
// ============================================================================

/// A document element containing an editor view, plus a manual-clock
/// scheduler. The view sits at page (100, 100) with size 400x300 and no
/// transform.
pub struct TestSurface {
    pub scheduler: Rc<FakeScheduler>,
    pub document: Rc<FakeElement>,
    pub view: Rc<FakeElement>,
}

impl TestSurface {
    pub fn new() -> Self {
        let document = FakeElement::unscaled(0.0, 0.0, 1024.0, 768.0);
        let view = FakeElement::unscaled(100.0, 100.0, 400.0, 300.0);
        document.add_child(Rc::clone(&view));
        Self {
            scheduler: FakeScheduler::new(),
            document,
            view,
        }
    }

    pub fn scheduler_ref(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.scheduler) as Rc<dyn Scheduler>
    }

    pub fn document_ref(&self) -> ElementRef {
        Rc::clone(&self.document) as ElementRef
    }

    pub fn view_ref(&self) -> ElementRef {
        Rc::clone(&self.view) as ElementRef
    }
}

// ============================================================================
// Event and property-set builders
// ============================================================================

pub fn pointer_event(kind: RawEventKind, page_x: f64, page_y: f64, buttons: Buttons) -> RawPointerEvent {
    RawPointerEvent::new(kind, page_x, page_y, buttons)
}

pub fn key_event(key: Key) -> RawKeyEvent {
    RawKeyEvent::new(key)
}

/// Build a property set from literal/themed pairs.
pub fn props(pairs: &[(&str, CssValue)]) -> CssProperties {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
