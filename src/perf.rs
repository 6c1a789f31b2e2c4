//! Performance instrumentation for input hot paths.
//!
//! Pointer-move handling and the style-rule sweep run inside event dispatch,
//! so they carry lightweight scoped timers that are zero-cost unless the
//! `profiling` feature is enabled.
//!
//! Use the profiling macro for zero-cost instrumentation:
//! ```ignore
//! fn dispatch_moves() {
//!     profile_scope!("dispatch_moves");
//!     // ... work ...
//! }
//! ```

use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
#[cfg(not(feature = "profiling"))]
use tracing::warn;

/// Budget for work done inside a single event-dispatch turn.
pub const DISPATCH_BUDGET_MS: f64 = 4.0;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
}

pub use profile_scope;

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Create a timer with the event-dispatch budget as its threshold.
    pub fn for_dispatch(name: &'static str) -> Self {
        Self::new(name, DISPATCH_BUDGET_MS)
    }

    /// Create a timer for profiling (lower threshold, 1ms).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    /// Get elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        if elapsed_ms > self.threshold_ms {
            trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);
        }

        #[cfg(not(feature = "profiling"))]
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

/// Measure execution time of a closure and return both the result and elapsed time.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
