//! The DOM-like element surface consumed by the input pipeline.

use std::rc::Rc;

use crate::geometry::{Rect, Size};
use crate::host::events::{KeyListener, PointerListener, RawEventKind};
use crate::host::subscription::Subscription;

/// Shared reference to a host element.
pub type ElementRef = Rc<dyn Element>;

/// Stable identity for a host element, used for containment checks and
/// diagnostics. Hosts must keep ids unique within a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A node of the host surface: geometry queries, tree membership, and
/// listener registration.
///
/// Everything here is a synchronous read of live host state; nothing is
/// cached on this side of the boundary because layout, transforms, and the
/// element tree may all change between events.
pub trait Element {
    /// Stable identity of this element.
    fn node_id(&self) -> NodeId;

    /// The element's rendered bounding box in page-absolute coordinates.
    ///
    /// This reflects CSS transforms: a `scale()`d element reports its
    /// scaled size here.
    fn bounding_rect(&self) -> Rect;

    /// The element's unscaled layout size (the host's "offset" size),
    /// unaffected by transforms.
    fn offset_size(&self) -> Size;

    /// True if `other` is this element or one of its descendants.
    fn contains(&self, other: &ElementRef) -> bool;

    /// True if this element renders inside a shadow-root container.
    fn is_in_shadow_root(&self) -> bool;

    /// Register a listener for a raw pointer-event kind on this element.
    ///
    /// The returned [`Subscription`] deregisters the listener; callers must
    /// release it to avoid leaks.
    fn add_pointer_listener(&self, kind: RawEventKind, listener: PointerListener) -> Subscription;

    /// Register a keyboard listener on this element. `capture` requests the
    /// capture phase, so the listener observes keys before any other handler.
    fn add_key_listener(&self, capture: bool, listener: KeyListener) -> Subscription;

    /// Route subsequent pointer events to this element regardless of where
    /// the pointer moves. Hosts without pointer capture may ignore this.
    fn set_pointer_capture(&self) {}

    /// Undo [`set_pointer_capture`](Element::set_pointer_capture).
    fn release_pointer_capture(&self) {}
}
