//! `scancel` invocation.

use tokio::process::Command;

use super::{CommandStatus, Slurm, COMMAND_TIMEOUT};
use crate::command::{run_command, CommandRequest};
use crate::job::JobId;

impl Slurm {
    /// Cancel one job.
    ///
    /// scancel prints nothing on success, so an empty stderr is reported as
    /// success with a synthetic message naming the job. Anything on stderr
    /// (including the tool's response to an already-cancelled or nonexistent
    /// job) is passed through verbatim; repeat cancels are the scheduler's
    /// call, not ours.
    pub async fn cancel(&self, job: &JobId) -> CommandStatus {
        let mut cmd = Command::new(&self.scancel);
        cmd.arg(job.as_str());

        match run_command(&mut cmd, CommandRequest::new(COMMAND_TIMEOUT)).await {
            Ok(output) => {
                CommandStatus::from_silent_tool(&output, format!("Success: scancel {job}"))
            }
            Err(err) => {
                tracing::error!(job_id = %job, error = %err, "scancel did not run");
                CommandStatus::from_command_error(&err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
