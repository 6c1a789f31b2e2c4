//! Pointer input pipeline.
//!
//! Raw host events flow through a wrapping step that attaches editor
//! geometry, then out to consumers through discrete or throttled listener
//! registrations; a separate monitor follows gestures beyond the widget's
//! bounds.
//!
//! ## Modules
//!
//! - `coords` - pure coordinate-space conversions with scale compensation
//! - `event` - the wrapped pointer-event type
//! - `throttle` - merge-based coalescing of high-frequency event streams
//! - `factory` - listener registration for both raw-event families
//! - `tracker` - document-level move tracking for the length of a gesture
//! - `monitor` - the cancelable Idle/Monitoring drag state machine

pub mod coords;
pub mod event;
pub mod factory;
pub mod monitor;
pub mod throttle;
pub mod tracker;

pub use coords::{
    ClientPosition, EditorBounds, EditorRelativePosition, PagePosition, relative_to_editor,
};
pub use event::WrappedPointerEvent;
pub use factory::{MOUSE_KINDS, POINTER_KINDS, PointerEventFactory, PointerKindSet};
pub use monitor::{GlobalDragMonitor, StopEvent};
pub use throttle::Throttled;
pub use tracker::GlobalMoveTracker;
