//! Coordinate model for pointer interactions.
//!
//! Converts between three coordinate spaces:
//!
//! - **page**: absolute document coordinates (what raw events report)
//! - **client**: relative to the visible viewport origin
//! - **editor-relative**: relative to the editor root's top-left, in the
//!   editor's unscaled logical space
//!
//! All operations are pure functions over immutable inputs. Scale
//! compensation handles uniform, non-rotational `transform: scale()`;
//! rotation and skew are an accepted limitation, not a bug. A zero-size
//! editor element produces non-finite relative coordinates - callers must
//! treat such output as "undefined position", never crash on it.

use crate::geometry::{Point, ScrollOffset, Size};
use crate::host::Element;

/// A position in absolute document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePosition {
    pub x: f64,
    pub y: f64,
}

impl PagePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Express this position relative to the viewport origin.
    pub fn to_client(self, scroll: ScrollOffset) -> ClientPosition {
        ClientPosition::new(self.x - scroll.x, self.y - scroll.y)
    }
}

/// A position relative to the visible viewport origin.
///
/// Clicking the top-left corner of the viewport always yields an x of 0
/// here, regardless of how far the page is scrolled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPosition {
    pub x: f64,
    pub y: f64,
}

impl ClientPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Express this position in absolute document coordinates.
    pub fn to_page(self, scroll: ScrollOffset) -> PagePosition {
        PagePosition::new(self.x + scroll.x, self.y + scroll.y)
    }
}

/// The editor root element's page position and rendered (possibly
/// transform-scaled) size, captured once per event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl EditorBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Capture the editor root's current rendered geometry.
    pub fn capture(view: &dyn Element) -> Self {
        let rect = view.bounding_rect();
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A pointer position relative to the editor's top-left, in the editor's
/// unscaled logical coordinate space.
///
/// Values may be negative or exceed the editor bounds when the pointer is
/// outside the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorRelativePosition {
    pub x: f64,
    pub y: f64,
}

impl EditorRelativePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True unless scale degeneration produced non-finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Transform a page position into the editor's unscaled coordinate space.
///
/// `bounds` holds the rendered size while `offset_size` is the element's
/// unscaled layout size; their ratio exposes any `transform: scale()` in
/// effect, which is applied in inverse. The scale factors are recomputed on
/// every call because transforms may change between events.
pub fn relative_to_editor(
    bounds: EditorBounds,
    offset_size: Size,
    pos: PagePosition,
) -> EditorRelativePosition {
    let scale_x = bounds.width / offset_size.width;
    let scale_y = bounds.height / offset_size.height;

    EditorRelativePosition::new((pos.x - bounds.x) / scale_x, (pos.y - bounds.y) / scale_y)
}
