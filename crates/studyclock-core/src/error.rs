//! Core error types for studyclock-core.
//!
//! Three families, mirroring how failures are recovered:
//! validation errors leave the rejected field at its prior value,
//! transition errors are descriptive no-ops, and shutdown errors are
//! reported but never block the final summary. None of them terminate
//! the process.

use thiserror::Error;

/// A configure field was rejected. The field keeps its prior value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Duration outside the allowed bounds for its phase.
    #[error("{field} duration {value} is out of range ({min}-{max} minutes)")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Input that could not be parsed as a minute count.
    #[error("{field} duration '{input}' is not a number")]
    NotANumber { field: &'static str, input: String },
}

/// A command was issued in a state that forbids it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("session already running")]
    AlreadyRunning,

    #[error("session already paused")]
    AlreadyPaused,

    #[error("no active session")]
    NoActiveSession,
}

/// A periodic driver failed to wind down within its grace period.
#[derive(Error, Debug)]
pub enum ShutdownError {
    /// The driver task was aborted after the bounded wait expired.
    #[error("{driver} driver did not stop within {grace_secs}s; aborted")]
    Timeout {
        driver: &'static str,
        grace_secs: u64,
    },
}
