//! Typed wrapper around raw pointer events.

use crate::host::{ElementRef, RawPointerEvent};
use crate::input::coords::{EditorBounds, EditorRelativePosition, PagePosition, relative_to_editor};

/// A raw pointer event decorated with its page position, the editor's
/// bounding geometry, and the editor-relative position.
///
/// Constructed once per dispatched raw event and immutable thereafter. By
/// contract it does not outlive the callback invocation it is delivered to;
/// there is no persistence guarantee for the captured geometry.
#[derive(Debug, Clone)]
pub struct WrappedPointerEvent {
    /// The raw host event.
    pub raw: RawPointerEvent,
    /// Pointer position in absolute document coordinates.
    pub page: PagePosition,
    /// The editor root's geometry at dispatch time.
    pub editor_bounds: EditorBounds,
    /// Pointer position in the editor's unscaled coordinate space.
    pub relative: EditorRelativePosition,
}

impl WrappedPointerEvent {
    /// Wrap `raw` against the editor root `view`.
    ///
    /// Performs exactly one synchronous geometry read of `view`; nothing is
    /// cached across events because layout may change between them.
    pub fn wrap(raw: RawPointerEvent, view: &ElementRef) -> Self {
        let page = PagePosition::new(raw.page_x, raw.page_y);
        let editor_bounds = EditorBounds::capture(view.as_ref());
        let relative = relative_to_editor(editor_bounds, view.offset_size(), page);

        Self {
            raw,
            page,
            editor_bounds,
            relative,
        }
    }
}
