//! Style-sheet injection provided by the host surface.

use std::rc::Rc;

use crate::host::element::ElementRef;

/// Creates live style-sheet nodes on the host surface.
pub trait StyleInjector {
    /// Create an empty style node.
    ///
    /// With `Some(container)` the node is scoped to that element's
    /// shadow-root; with `None` it lands in the host's default document-level
    /// style area.
    fn create_style_node(&self, container: Option<&ElementRef>) -> Rc<dyn StyleNode>;
}

/// A live, injected style-sheet node.
pub trait StyleNode {
    /// Replace the node's CSS text.
    fn set_text(&self, css: &str);

    /// Remove the node from its container. Further calls are no-ops.
    fn remove(&self);
}
