//! Host-surface abstraction.
//!
//! The editor widget lives inside a browser-like surface that owns the
//! element tree, the event loop, and style-sheet injection. This module
//! defines the narrow trait boundary the rest of the crate consumes, so the
//! core logic stays testable against fake hosts.
//!
//! ## Modules
//!
//! - `element` - element geometry, tree membership, listener registration
//! - `events` - raw pointer/keyboard event records
//! - `scheduler` - cancelable one-shot timers and the debouncer built on them
//! - `style` - style-sheet node creation and removal
//! - `subscription` - scoped-acquisition handles for listeners

pub mod element;
pub mod events;
pub mod scheduler;
pub mod style;
pub mod subscription;

pub use element::{Element, ElementRef, NodeId};
pub use events::{Buttons, Key, RawEventKind, RawKeyEvent, RawPointerEvent};
pub use scheduler::{Debouncer, Scheduler, TimerHandle};
pub use style::{StyleInjector, StyleNode};
pub use subscription::Subscription;
