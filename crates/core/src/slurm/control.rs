//! `scontrol hold` / `scontrol release` invocations.

use std::fmt;
use std::str::FromStr;

use tokio::process::Command;

use super::{CommandStatus, Slurm, COMMAND_TIMEOUT};
use crate::command::{run_command, CommandRequest};
use crate::error::CoreError;
use crate::job::JobId;

/// Allow-listed scontrol sub-actions.
///
/// Anything else the richer `scontrol` surface offers is deliberately not
/// reachable through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Hold,
    Release,
}

impl ControlAction {
    /// The action verb as passed to scontrol.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Release => "release",
        }
    }
}

impl FromStr for ControlAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hold" => Ok(Self::Hold),
            "release" => Ok(Self::Release),
            other => Err(CoreError::InvalidCommand(other.to_string())),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Slurm {
    /// Hold or release one job.
    ///
    /// Arguments are passed action first, job ID second, matching
    /// `scontrol <action> <jobID>`. Result shaping follows
    /// [`Slurm::cancel`]: scontrol is silent on success.
    pub async fn control(&self, action: ControlAction, job: &JobId) -> CommandStatus {
        let mut cmd = Command::new(&self.scontrol);
        cmd.arg(action.as_str()).arg(job.as_str());

        match run_command(&mut cmd, CommandRequest::new(COMMAND_TIMEOUT)).await {
            Ok(output) => CommandStatus::from_silent_tool(
                &output,
                format!("Success: scontrol {action} {job}"),
            ),
            Err(err) => {
                tracing::error!(job_id = %job, action = %action, error = %err, "scontrol did not run");
                CommandStatus::from_command_error(&err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::slurm::test_helpers::{stub_tool, tool_path};

    fn job(raw: &str) -> JobId {
        JobId::parse(raw).expect("valid job ID")
    }

    #[test]
    fn parses_the_allow_listed_actions() {
        assert_eq!("hold".parse::<ControlAction>().unwrap(), ControlAction::Hold);
        assert_eq!(
            "release".parse::<ControlAction>().unwrap(),
            ControlAction::Release
        );
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["resume", "suspend", "HOLD", "hold ", "", "requeue"] {
            assert_matches!(
                raw.parse::<ControlAction>(),
                Err(CoreError::InvalidCommand(bad)) if bad == raw,
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn passes_action_then_job_id() {
        let log = tempfile::NamedTempFile::new().expect("create log file");
        let log_path = log.path().to_str().expect("utf-8 path");
        let stub = stub_tool(&format!("printf '%s\\n' \"$@\" > {log_path}\n"));
        let slurm = Slurm {
            scontrol: tool_path(&stub),
            ..Slurm::default()
        };

        let status = slurm.control(ControlAction::Hold, &job("123")).await;
        assert_eq!(status.response_message, "Success: scontrol hold 123");

        let seen = std::fs::read_to_string(log.path()).expect("read log");
        assert_eq!(seen, "hold\n123\n");
    }

    #[tokio::test]
    async fn release_success_message_names_the_action() {
        let stub = stub_tool("exit 0\n");
        let slurm = Slurm {
            scontrol: tool_path(&stub),
            ..Slurm::default()
        };
        let status = slurm.control(ControlAction::Release, &job("456")).await;
        assert_eq!(status.response_message, "Success: scontrol release 456");
        assert_eq!(status.error_message, "");
    }

    #[tokio::test]
    async fn stderr_is_surfaced_verbatim() {
        let stub = stub_tool("echo 'slurm_hold error: Invalid job id specified' >&2\nexit 1\n");
        let slurm = Slurm {
            scontrol: tool_path(&stub),
            ..Slurm::default()
        };
        let status = slurm.control(ControlAction::Hold, &job("999")).await;
        assert_eq!(status.response_message, "");
        assert_eq!(status.error_message, "slurm_hold error: Invalid job id specified");
        assert_eq!(status.returncode, 1);
    }
}
