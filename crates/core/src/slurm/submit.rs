//! `sbatch` submission, from a script path or inline script text.

use std::io::Write as _;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;
use tokio::process::Command;

use super::{CommandStatus, Slurm, COMMAND_TIMEOUT};
use crate::command::{run_command, CommandError, CommandOutput, CommandRequest};

/// Trailing digits of sbatch's success line (`Submitted batch job 123`).
static TRAILING_JOB_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([0-9]+)$").expect("valid regex"));

/// How a batch script is supplied to [`Slurm::submit`].
#[derive(Debug, Clone)]
pub enum ScriptInput {
    /// Path to an existing batch script, passed to sbatch as an argument.
    Path(String),
    /// Inline script text, staged to a temp file and fed to sbatch's stdin.
    Contents(String),
}

/// Result of a submission attempt.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The shaped envelope for the response.
    pub status: CommandStatus,
    /// Job ID extracted from the tail of sbatch's stdout, when the output
    /// format allows it. Extraction is best-effort; `None` is not a failure.
    pub job_id: Option<String>,
}

impl Slurm {
    /// Submit a batch script, optionally in `working_dir`.
    ///
    /// Inline contents are staged through a uniquely named temp file in the
    /// configured staging directory; the file is removed on every exit path,
    /// including spawn failure and timeout.
    pub async fn submit(&self, input: &ScriptInput, working_dir: Option<&Path>) -> SubmitOutcome {
        let result = match input {
            ScriptInput::Path(path) => self.submit_path(path, working_dir).await,
            ScriptInput::Contents(text) => self.submit_contents(text, working_dir).await,
        };

        match result {
            Ok(output) => {
                let job_id = if output.exit_code == 0 {
                    extract_job_id(&output.stdout)
                } else {
                    None
                };
                SubmitOutcome {
                    status: shape_submit_status(&output),
                    job_id,
                }
            }
            Err(err) => {
                let diagnostic = self.spawn_diagnostic(input, working_dir);
                tracing::error!(error = %err, "sbatch did not run: {diagnostic}");
                SubmitOutcome {
                    status: CommandStatus {
                        response_message: format!("Failure: {diagnostic}"),
                        error_message: err.to_string(),
                        returncode: -1,
                    },
                    job_id: None,
                }
            }
        }
    }

    async fn submit_path(
        &self,
        path: &str,
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        let mut cmd = Command::new(&self.sbatch);
        cmd.arg(path);
        let request = CommandRequest {
            stdin: None,
            working_dir: working_dir.map(Path::to_path_buf),
            timeout: COMMAND_TIMEOUT,
        };
        run_command(&mut cmd, request).await
    }

    async fn submit_contents(
        &self,
        text: &str,
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        // The temp file is unlinked when `staged` drops, whichever way this
        // function exits.
        let staged = self.stage_script(text)?;
        let stdin = staged.reopen()?;

        let mut cmd = Command::new(&self.sbatch);
        let request = CommandRequest {
            stdin: Some(stdin),
            working_dir: working_dir.map(Path::to_path_buf),
            timeout: COMMAND_TIMEOUT,
        };
        run_command(&mut cmd, request).await
    }

    /// Write `text` to a fresh, uniquely named temp file in the configured
    /// staging directory. The reopened handle handed to the child starts at
    /// offset 0, so no rewind is needed.
    fn stage_script(&self, text: &str) -> std::io::Result<NamedTempFile> {
        let builder_result = match &self.temp_dir {
            Some(dir) => tempfile::Builder::new().prefix("sbatch-").tempfile_in(dir),
            None => tempfile::Builder::new().prefix("sbatch-").tempfile(),
        };
        let mut staged = builder_result?;
        staged.write_all(text.as_bytes())?;
        staged.flush()?;
        Ok(staged)
    }

    /// Text for the stderr-equivalent shown when sbatch itself could not be
    /// started, naming what was attempted so misconfigured paths can be
    /// diagnosed from the response alone.
    fn spawn_diagnostic(&self, input: &ScriptInput, working_dir: Option<&Path>) -> String {
        let dir = working_dir
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        match input {
            ScriptInput::Path(path) => format!(
                "Attempted to run: command - {}, path - {}, dir - {}. Check console for more details.",
                self.sbatch, path, dir
            ),
            ScriptInput::Contents(_) => format!(
                "Attempted to run: command - {}, script - <stdin from tempfile>, dir - {}. Check console for more details.",
                self.sbatch, dir
            ),
        }
    }
}

/// Shape sbatch's output: its stdout narrates success, its stderr failure.
fn shape_submit_status(output: &CommandOutput) -> CommandStatus {
    if output.exit_code == 0 {
        CommandStatus {
            response_message: format!("Success: {}", output.stdout),
            error_message: String::new(),
            returncode: 0,
        }
    } else {
        CommandStatus {
            response_message: format!("Failure: {}", output.stderr),
            error_message: output.stderr.clone(),
            returncode: output.exit_code,
        }
    }
}

/// Pull the numeric job ID off the end of sbatch's stdout, if present.
fn extract_job_id(stdout: &str) -> Option<String> {
    TRAILING_JOB_ID_RE
        .captures(stdout.trim())
        .map(|captures| captures[1].to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
