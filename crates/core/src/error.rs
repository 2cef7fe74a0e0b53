//! Validation errors shared across the bridge.

/// Request validation errors.
///
/// Every variant is detected before any subprocess is spawned; the api crate
/// maps them to a 400 response carrying the standard JSON envelope with a
/// `-1` returncode.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required query or body argument was absent.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// A job ID failed the numeric format check.
    #[error("jobID {0} is invalid")]
    InvalidJobId(String),

    /// An `scontrol` action outside the hold/release allow-list.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
