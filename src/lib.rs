//! Pointer-input and dynamic-style support core for a text-editor widget
//! embedded in a browser-like surface.
//!
//! The crate has two independent halves:
//!
//! - **Input** ([`input`]): converts raw pointer-device coordinates into
//!   editor-relative coordinates that stay correct under CSS scale
//!   transforms, wraps raw events into a typed stream with throttled-merge
//!   delivery, and implements a cancelable global drag-tracking protocol.
//! - **Style** ([`style`]): a reference-counted, lazily garbage-collected
//!   pool of generated style rules, content-addressed so equal property
//!   sets share one injected style node.
//!
//! The surrounding editor - layout, text rendering, command execution, the
//! application shell - is an external collaborator reached through the
//! [`host`] traits. Everything here is single-threaded and event-driven:
//! state mutates only inside synchronous event callbacks, and deferred work
//! (throttled delivery, the style-rule sweep) runs as later turns of the
//! host's event loop.
//!
//! Known limitation: scale compensation covers uniform, non-rotational
//! `transform: scale()` only; rotation and skew are unsupported.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod perf;
pub mod style;

pub use error::{Error, Result};
pub use geometry::{Point, Rect, ScrollOffset, Size};
pub use input::{
    GlobalDragMonitor, PagePosition, PointerEventFactory, StopEvent, WrappedPointerEvent,
};
pub use style::{ClassNameLease, CssProperties, CssValue, DynamicRuleCache};
