//! Subprocess execution shared by every Slurm operation.
//!
//! Callers build a [`tokio::process::Command`] with the program and argument
//! vector appropriate for their tool, then delegate the actual spawn, stdin
//! handoff, output capture, and timeout handling to
//! [`runner::run_command`].

pub mod runner;

use std::path::PathBuf;
use std::time::Duration;

pub use runner::run_command;

/// Per-invocation execution parameters for [`run_command`].
#[derive(Debug)]
pub struct CommandRequest {
    /// File handed to the child as its stdin; `None` means null stdin.
    pub stdin: Option<std::fs::File>,
    /// Working directory for the child (inherits the server's if `None`).
    pub working_dir: Option<PathBuf>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

impl CommandRequest {
    /// A request with no stdin and no working-directory override.
    pub fn new(timeout: Duration) -> Self {
        Self {
            stdin: None,
            working_dir: None,
            timeout,
        }
    }
}

/// Captured result of a completed child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whitespace-trimmed stdout, decoded with lossy UTF-8 substitution.
    pub stdout: String,
    /// Whitespace-trimmed stderr, decoded with lossy UTF-8 substitution.
    pub stderr: String,
    /// Process exit code (`-1` if killed by a signal).
    pub exit_code: i32,
}

/// Errors from spawning or supervising a child process.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The executable could not be started (not found, not executable).
    #[error("Failed to run {program}: {source}")]
    SpawnFailure {
        /// The program the caller attempted to run.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The process exceeded its deadline and was killed.
    #[error("Command timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },

    /// An I/O error occurred while communicating with the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
