//! Error types for the input and style subsystems.
//!
//! Failure modes here are caller-contract violations; numeric degeneration
//! (zero-size elements producing non-finite coordinates) is deliberately not
//! an error - callers must treat such output as "undefined position".

use thiserror::Error;

/// Errors that can occur in the input pipeline.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// `start_monitoring` was called while a drag session is already active.
    /// Sessions are never silently queued; the caller must stop the current
    /// session first.
    #[error("drag monitor is already in a monitoring session")]
    AlreadyMonitoring,
}

/// Result type alias for input operations.
pub type Result<T> = std::result::Result<T, Error>;
