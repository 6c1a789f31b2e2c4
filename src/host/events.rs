//! Raw input events as delivered by the host surface.
//!
//! These are thin, platform-shaped records; the typed editor-relative view
//! of a pointer event lives in [`crate::input::event`].

use std::rc::Rc;

use crate::host::element::ElementRef;

/// Raw pointer-event kinds the host can deliver, covering both the
/// mouse-style and pointer-style event families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOut,
    PointerDown,
    PointerUp,
    PointerMove,
    PointerOut,
    ContextMenu,
}

/// Pressed-button mask, one bit per button (primary = bit 0, matching the
/// host surface's `buttons` convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const PRIMARY: Buttons = Buttons(1);
    pub const SECONDARY: Buttons = Buttons(2);
    pub const AUXILIARY: Buttons = Buttons(4);

    /// True if every button in `other` is also pressed in `self`.
    pub fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A raw pointer event from the host, with page-absolute coordinates.
#[derive(Clone)]
pub struct RawPointerEvent {
    pub kind: RawEventKind,
    /// Pointer x in absolute document coordinates.
    pub page_x: f64,
    /// Pointer y in absolute document coordinates.
    pub page_y: f64,
    /// Buttons held at dispatch time.
    pub buttons: Buttons,
    /// Element the event was dispatched on.
    pub target: Option<ElementRef>,
    /// For out/leave transitions: the element the pointer moved into.
    pub related_target: Option<ElementRef>,
}

impl RawPointerEvent {
    /// A minimal event with no target information.
    pub fn new(kind: RawEventKind, page_x: f64, page_y: f64, buttons: Buttons) -> Self {
        Self {
            kind,
            page_x,
            page_y,
            buttons,
            target: None,
            related_target: None,
        }
    }

    pub fn with_target(mut self, target: ElementRef) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_related_target(mut self, related: ElementRef) -> Self {
        self.related_target = Some(related);
        self
    }
}

impl std::fmt::Debug for RawPointerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawPointerEvent")
            .field("kind", &self.kind)
            .field("page_x", &self.page_x)
            .field("page_y", &self.page_y)
            .field("buttons", &self.buttons)
            .field("target", &self.target.as_ref().map(|t| t.node_id()))
            .field(
                "related_target",
                &self.related_target.as_ref().map(|t| t.node_id()),
            )
            .finish()
    }
}

/// Key identity, reduced to what the input pipeline needs: distinguishing
/// modifier-only presses from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Control,
    Alt,
    Meta,
    Escape,
    Enter,
    Tab,
    Character(char),
}

impl Key {
    /// True for keys that only modify other input (Shift, Ctrl, Alt, Meta).
    ///
    /// Holding a modifier during a drag gesture is expected and must not
    /// cancel the gesture.
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }
}

/// A raw keyboard event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: Key,
}

impl RawKeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

/// Convenience alias used by listener registration.
pub type PointerListener = Rc<dyn Fn(&RawPointerEvent)>;
/// Convenience alias used by listener registration.
pub type KeyListener = Rc<dyn Fn(&RawKeyEvent)>;
