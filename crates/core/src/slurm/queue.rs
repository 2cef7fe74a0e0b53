//! `squeue` invocation and queue-listing parsing.

use serde::Serialize;
use tokio::process::Command;

use super::{CommandStatus, Slurm, COMMAND_TIMEOUT};
use crate::command::{run_command, CommandRequest};

/// Fixed output format requested from squeue: 8 space-separated columns
/// (job ID, partition, name, user, state, time, nodes, nodelist/reason).
/// The bridge's parsing and the table consuming it both assume this layout.
const SQUEUE_FORMAT: &str = "%.18i %.9P %.8j %.8u %.2t %.10M %.6D %R";

/// Number of columns requested via [`SQUEUE_FORMAT`].
const QUEUE_FIELDS: usize = 8;

/// A parsed queue listing plus the status of the squeue invocation.
#[derive(Debug, Clone, Serialize)]
pub struct QueueListing {
    /// One 8-field row per job, in squeue's own output order.
    pub rows: Vec<Vec<String>>,
    /// Exit status of the underlying squeue call.
    pub status: CommandStatus,
}

impl Slurm {
    /// List queued jobs, optionally restricted to `user`'s jobs.
    ///
    /// A failed invocation still returns whatever rows were parsed from the
    /// captured stdout; the failure itself travels in `status`.
    pub async fn queue(&self, user: Option<&str>) -> QueueListing {
        let mut cmd = Command::new(&self.squeue);
        if let Some(user) = user {
            cmd.arg("-u").arg(user);
        }
        // -h suppresses the header row so every stdout line is a job.
        cmd.arg("-o").arg(SQUEUE_FORMAT).arg("-h");

        match run_command(&mut cmd, CommandRequest::new(COMMAND_TIMEOUT)).await {
            Ok(output) => {
                if output.exit_code != 0 {
                    tracing::warn!(
                        exit_code = output.exit_code,
                        stderr = %output.stderr,
                        "squeue reported failure",
                    );
                }
                QueueListing {
                    rows: parse_queue_output(&output.stdout),
                    status: CommandStatus {
                        response_message: String::new(),
                        error_message: output.stderr,
                        returncode: output.exit_code,
                    },
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "squeue did not run");
                QueueListing {
                    rows: Vec::new(),
                    status: CommandStatus::from_command_error(&err),
                }
            }
        }
    }
}

/// Parse squeue stdout into 8-field rows.
///
/// The final field absorbs the remainder of each line, so free-text reason
/// columns with embedded spaces (e.g. burst-buffer error messages) survive
/// as one field. Lines that do not yield exactly 8 fields are logged and
/// skipped without aborting the rest of the listing. Every field is
/// HTML-escaped so a job name like `<script>…</script>` can never reach the
/// hosting page as live markup.
fn parse_queue_output(stdout: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for line in stdout.lines() {
        let fields = split_fields(line, QUEUE_FIELDS);
        if fields.len() == QUEUE_FIELDS {
            rows.push(
                fields
                    .iter()
                    .map(|field| ammonia::clean_text(field).trim().to_string())
                    .collect(),
            );
        } else if !fields.is_empty() {
            tracing::warn!(
                line,
                field_count = fields.len(),
                "Skipping malformed squeue line",
            );
        }
    }
    rows
}

/// Split on whitespace runs into at most `max_fields` fields; the last
/// field keeps the rest of the line verbatim.
fn split_fields(line: &str, max_fields: usize) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        if fields.len() + 1 == max_fields {
            fields.push(rest);
            return fields;
        }
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                fields.push(&rest[..idx]);
                rest = rest[idx..].trim_start();
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
