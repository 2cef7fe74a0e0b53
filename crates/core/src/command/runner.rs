//! The single place a child process is spawned.
//!
//! [`run_command`] owns stdin handoff, capped concurrent stdout/stderr
//! capture, and the wall-clock timeout. Callers configure the program and
//! argument vector on the [`tokio::process::Command`] before delegating
//! here.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::{CommandError, CommandOutput, CommandRequest};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Output exceeding this limit is truncated to prevent memory exhaustion
/// from an extremely verbose tool.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Spawn `cmd` as a child process, hand over stdin if present, capture
/// stdout/stderr, and enforce the requested timeout.
///
/// The caller is responsible for setting the command program and arguments
/// before calling this function; stdin and working directory from
/// [`CommandRequest`] are applied here.
pub async fn run_command(
    cmd: &mut Command,
    request: CommandRequest,
) -> Result<CommandOutput, CommandError> {
    // `kill_on_drop(true)` ensures the child is killed when dropped (e.g. on
    // timeout).
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match request.stdin {
        Some(file) => cmd.stdin(Stdio::from(file)),
        None => cmd.stdin(Stdio::null()),
    };

    if let Some(dir) = &request.working_dir {
        cmd.current_dir(dir);
    }

    let program = cmd
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|source| CommandError::SpawnFailure {
        program,
        source,
    })?;

    // Take stdout/stderr handles and read them in spawned tasks so we can
    // still call `child.wait()` (which borrows `&mut child`).
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    // Wait for the child process with a timeout. If the timeout fires,
    // `child` is dropped with `kill_on_drop(true)`, killing the process.
    let wait_result = tokio::time::timeout(request.timeout, child.wait()).await;

    match wait_result {
        Ok(Ok(status)) => {
            let stdout_bytes = stdout_task.await.unwrap_or_default();
            let stderr_bytes = stderr_task.await.unwrap_or_default();
            // Non-UTF-8 output is decoded with replacement characters rather
            // than failing the invocation.
            let stdout = String::from_utf8_lossy(&stdout_bytes).trim().to_string();
            let stderr = String::from_utf8_lossy(&stderr_bytes).trim().to_string();
            let exit_code = status.code().unwrap_or(-1);

            Ok(CommandOutput {
                stdout,
                stderr,
                exit_code,
            })
        }
        Ok(Err(e)) => Err(CommandError::Io(e)),
        Err(_elapsed) => {
            // Timeout expired. `child` is dropped here, which kills the
            // process because we set `kill_on_drop(true)`.
            Err(CommandError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::time::Duration;

    use super::*;

    fn request(timeout_ms: u64) -> CommandRequest {
        CommandRequest::new(Duration::from_millis(timeout_ms))
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let output = run_command(&mut cmd, request(5000)).await.expect("run");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "hello");
        assert_eq!(output.stderr, "");
    }

    #[tokio::test]
    async fn captures_stderr_and_nonzero_exit() {
        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg("echo oops >&2; exit 3");
        let output = run_command(&mut cmd, request(5000)).await.expect("run");
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr, "oops");
    }

    #[tokio::test]
    async fn feeds_stdin_from_a_file() {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        write!(f, "piped contents").expect("write");
        f.flush().expect("flush");
        let stdin = f.reopen().expect("reopen");

        let mut cmd = Command::new("cat");
        let output = run_command(
            &mut cmd,
            CommandRequest {
                stdin: Some(stdin),
                working_dir: None,
                timeout: Duration::from_secs(5),
            },
        )
        .await
        .expect("run");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "piped contents");
    }

    #[tokio::test]
    async fn null_stdin_when_no_stream_given() {
        // `cat` with a null stdin sees EOF immediately instead of blocking.
        let mut cmd = Command::new("cat");
        let output = run_command(&mut cmd, request(5000)).await.expect("run");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "");
    }

    #[tokio::test]
    async fn applies_working_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut cmd = Command::new("pwd");
        let output = run_command(
            &mut cmd,
            CommandRequest {
                stdin: None,
                working_dir: Some(dir.path().to_path_buf()),
                timeout: Duration::from_secs(5),
            },
        )
        .await
        .expect("run");
        // The resolved path may differ due to symlinks, so canonicalize.
        let expected = dir.path().canonicalize().expect("canonicalize dir");
        assert_eq!(
            std::path::Path::new(&output.stdout)
                .canonicalize()
                .expect("canonicalize output"),
            expected
        );
    }

    #[tokio::test]
    async fn timeout_kills_a_hung_process() {
        let mut cmd = Command::new("sleep");
        cmd.arg("60");
        let result = run_command(&mut cmd, request(200)).await;
        assert!(matches!(result, Err(CommandError::Timeout { .. })));
    }

    #[tokio::test]
    async fn spawn_failure_names_the_program() {
        let mut cmd = Command::new("/nonexistent/definitely-not-squeue");
        let result = run_command(&mut cmd, request(5000)).await;
        match result {
            Err(CommandError::SpawnFailure { program, .. }) => {
                assert_eq!(program, "/nonexistent/definitely-not-squeue");
            }
            other => panic!("expected SpawnFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_utf8_output_is_replaced_not_fatal() {
        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg("printf '\\xffok'");
        let output = run_command(&mut cmd, request(5000)).await.expect("run");
        assert_eq!(output.exit_code, 0);
        assert!(output.stdout.contains("ok"));
        assert!(output.stdout.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn signal_death_reports_negative_exit_code() {
        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg("kill -9 $$");
        let output = run_command(&mut cmd, request(5000)).await.expect("run");
        assert_eq!(output.exit_code, -1);
    }
}
