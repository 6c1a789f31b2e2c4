//! Crate-wide constants.
//!
//! Centralizes magic numbers and timing values to make the codebase
//! more maintainable and self-documenting.

use std::time::Duration;

// ============================================================================
// Style Rule Cache
// ============================================================================

/// Delay between the last lease release and the garbage-collection sweep.
///
/// The delay is deliberate: rapid lease/release churn of identical styles
/// (hover flicker, immediate reacquisition by another widget instance) must
/// reuse the existing native style node rather than recreate it.
pub const STYLE_RULE_GC_DELAY: Duration = Duration::from_millis(1000);

/// Prefix for generated class names (`<prefix>-<instance>-<n>`).
pub const RULE_CLASS_PREFIX: &str = "dyn-rule";

// ============================================================================
// Pointer Input
// ============================================================================

/// Throttle interval applied to global move events during a drag session.
///
/// Zero means "coalesce everything that arrives within one host turn and
/// deliver on the next", which bounds per-turn work without adding
/// perceptible latency to drag feedback.
pub const MONITOR_MOVE_THROTTLE: Duration = Duration::ZERO;
