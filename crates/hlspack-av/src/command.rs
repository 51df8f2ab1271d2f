//! Builder for executing the external engine with timeout and cancellation.
//!
//! Engine diagnostics (stderr) are streamed into the tracing log as they
//! arrive rather than inherited from the parent process, so output can be
//! filtered and tested; the tail is retained for error context. Exit status
//! maps to a typed result: non-zero exit and signal termination are distinct
//! failure kinds, never silently treated as success.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Default command timeout: 5 minutes. Encodes override this (see
/// [`crate::actions::run_transcode`]).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Number of trailing stderr lines retained for failure diagnostics.
const STDERR_TAIL_LINES: usize = 12;

/// Output captured from a [`EngineCommand::capture`] execution.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing engine invocations.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl EngineCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    fn spawn_error(&self, e: std::io::Error) -> Error {
        match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Error::tool_not_found(self.program_name())
            }
            _ => Error::Io(e),
        }
    }

    /// Run the command to completion, streaming its stderr into the log.
    ///
    /// Diagnostics appear at debug level under the `hlspack_av::command`
    /// target; raise `RUST_LOG` to watch engine progress live.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program cannot be launched.
    /// - [`Error::EngineFailure`] on a non-zero exit, carrying the exit code
    ///   and the retained stderr tail.
    /// - [`Error::EngineTerminated`] if the process dies to a signal --
    ///   including the kill issued on cancellation or timeout.
    pub async fn run(&self, cancel: Option<CancellationToken>) -> Result<()> {
        let program_name = self.program_name();
        tracing::debug!("running {} {}", program_name, self.args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        // Drain stderr concurrently so the child never blocks on a full pipe.
        let stderr = child.stderr.take();
        let drain = tokio::spawn(async move {
            let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    tracing::debug!(target: "hlspack_av::command", "{line}");
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
            }
            tail
        });

        let outcome = tokio::select! {
            status = child.wait() => WaitOutcome::Exited(status),
            _ = cancelled(cancel.as_ref()) => WaitOutcome::Cancelled,
            _ = tokio::time::sleep(self.timeout) => WaitOutcome::TimedOut,
        };

        let status = match outcome {
            WaitOutcome::Exited(status) => status?,
            WaitOutcome::Cancelled => {
                tracing::warn!("{program_name} cancelled; killing process");
                child.kill().await?;
                child.wait().await?
            }
            WaitOutcome::TimedOut => {
                tracing::warn!(
                    "{program_name} timed out after {:?}; killing process",
                    self.timeout
                );
                child.kill().await?;
                child.wait().await?
            }
        };

        let tail = drain.await.unwrap_or_default();

        if status.success() {
            return Ok(());
        }
        Err(exit_error(status, &tail))
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// Unlike [`Self::run`], a non-zero exit is not an error here -- callers
    /// inspect [`EngineOutput::status`] and decide. Used for short-lived
    /// inspection tools (ffprobe), not encodes.
    pub async fn capture(&self) -> Result<EngineOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!(
                    "{} timed out after {:?}",
                    self.program_name(),
                    self.timeout
                );
                Error::EngineTerminated { signal: None }
            })??;

        Ok(EngineOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

enum WaitOutcome {
    Exited(std::io::Result<ExitStatus>),
    Cancelled,
    TimedOut,
}

async fn cancelled(cancel: Option<&CancellationToken>) {
    match cancel {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

fn exit_error(status: ExitStatus, tail: &VecDeque<String>) -> Error {
    match status.code() {
        Some(exit_code) => {
            let detail = if tail.is_empty() {
                "no diagnostic output".to_string()
            } else {
                tail.iter().cloned().collect::<Vec<_>>().join("\n")
            };
            Error::EngineFailure { exit_code, detail }
        }
        None => {
            #[cfg(unix)]
            let signal = std::os::unix::process::ExitStatusExt::signal(&status);
            #[cfg(not(unix))]
            let signal: Option<i32> = None;
            Error::EngineTerminated { signal }
        }
    }
}
