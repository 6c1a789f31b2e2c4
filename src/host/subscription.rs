//! Scoped-acquisition handle for listeners and other host resources.

/// A handle owning the teardown of an acquired host resource (typically a
/// registered event listener).
///
/// The teardown runs exactly once: either on the first [`cancel`] call or
/// when the handle is dropped. Calling [`cancel`] again afterwards is a
/// defined no-op.
///
/// [`cancel`]: Subscription::cancel
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` on release.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription with nothing to release.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Release the underlying resource now. No-op if already released.
    pub fn cancel(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Leak the subscription: the resource stays acquired for the rest of
    /// the process lifetime.
    pub fn detach(mut self) {
        self.teardown = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}
