//! External build tool execution.
//!
//! The orchestrator talks to a [`ProcessRunner`] instead of spawning
//! processes directly, so tests can substitute a scripted fake.

use crate::collector::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Whether the process exited successfully
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Everything the process wrote to stdout
    pub stdout: String,
}

/// Runs the build tool and captures its output.
pub trait ProcessRunner: Send + Sync {
    /// Runs the tool in `working_dir` with `args` and resolves once it has
    /// exited and its stdout has been read to the end.
    ///
    /// Cancelling `cancel` terminates the process and yields
    /// [`Error::BuildTool`]; the caller decides whether that ends the run.
    fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<ProcessOutput>> + Send;
}

/// Runs the `dotnet` CLI.
#[derive(Debug, Clone)]
pub struct DotnetRunner {
    program: PathBuf,
}

/// Hides the console window of the child process on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

impl DotnetRunner {
    /// Creates a runner for the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Creates a runner for the `dotnet` found on PATH.
    pub fn detect() -> Result<Self> {
        super::tool_detection::find_dotnet().map(Self::new)
    }

    /// Path of the executable being run.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ProcessRunner for DotnetRunner {
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        cancel: &CancellationToken,
    ) -> Result<ProcessOutput> {
        let command_line = format!("{} {}", self.program.display(), args.join(" "));
        log::debug!("Running in {}: {}", working_dir.display(), command_line);

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let child = command.spawn().map_err(|e| Error::CommandFailed {
            command: command_line.clone(),
            error: e,
        })?;

        // Dropping the wait future drops the child, which kills it.
        let output = tokio::select! {
            output = child.wait_with_output() => output.map_err(|e| Error::CommandFailed {
                command: command_line.clone(),
                error: e,
            })?,
            _ = cancel.cancelled() => {
                log::warn!("Cancelled while running: {}", command_line);
                return Err(Error::BuildTool(format!("Cancelled while running {}", command_line)));
            }
        };

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
