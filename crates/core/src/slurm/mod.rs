//! Invocations of the Slurm command-line tools.
//!
//! [`Slurm`] holds the resolved paths of the four tools plus the staging
//! directory for inline submission scripts. Each operation shells out
//! through [`crate::command::run_command`] and shapes the captured
//! stdout/stderr/exit code into a [`CommandStatus`], the uniform result the
//! api crate serializes into the response envelope.
//!
//! Validation never happens here: `cancel` and `control` take an
//! already-validated [`crate::job::JobId`], and the submission input arrives
//! as a typed [`submit::ScriptInput`].

pub mod cancel;
pub mod control;
pub mod queue;
pub mod submit;

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::command::{CommandError, CommandOutput};

/// Wall-clock deadline applied to every Slurm invocation.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Handle to the four Slurm CLI tools.
///
/// Paths default to bare command names resolved via `PATH`; deployments
/// with tools outside `PATH` configure absolute paths instead.
#[derive(Debug, Clone)]
pub struct Slurm {
    /// Path to the queue-listing tool.
    pub squeue: String,
    /// Path to the job-cancel tool.
    pub scancel: String,
    /// Path to the job-control tool.
    pub scontrol: String,
    /// Path to the job-submission tool.
    pub sbatch: String,
    /// Directory for staging inline submission scripts (system temp dir if
    /// `None`).
    pub temp_dir: Option<PathBuf>,
}

impl Default for Slurm {
    fn default() -> Self {
        Self {
            squeue: "squeue".to_string(),
            scancel: "scancel".to_string(),
            scontrol: "scontrol".to_string(),
            sbatch: "sbatch".to_string(),
            temp_dir: None,
        }
    }
}

/// Uniform per-operation result built from a tool's stdout/stderr/exit code.
///
/// Serializes to the wire envelope: `responseMessage`, `errorMessage`,
/// `returncode`. `error_message` is empty only on confirmed success;
/// `returncode` mirrors the process exit code, or is `-1` when no exit code
/// was ever produced (spawn failure, timeout).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandStatus {
    /// Human-readable outcome description.
    pub response_message: String,
    /// Failure description; empty on success.
    pub error_message: String,
    /// Underlying process exit code, or `-1` if no process completed.
    pub returncode: i32,
}

impl CommandStatus {
    /// Shape the result of a tool that prints nothing on success
    /// (`scancel`, `scontrol`): an empty stderr gets the synthetic
    /// `success_message`, a non-empty stderr is surfaced verbatim.
    fn from_silent_tool(output: &CommandOutput, success_message: String) -> Self {
        if output.stderr.is_empty() {
            Self {
                response_message: success_message,
                error_message: String::new(),
                returncode: output.exit_code,
            }
        } else {
            Self {
                response_message: String::new(),
                error_message: output.stderr.clone(),
                returncode: output.exit_code,
            }
        }
    }

    /// Shape an infrastructure failure that never produced an exit code.
    fn from_command_error(err: &CommandError) -> Self {
        Self {
            response_message: String::new(),
            error_message: err.to_string(),
            returncode: -1,
        }
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
