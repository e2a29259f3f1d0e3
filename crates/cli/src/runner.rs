// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child process execution with merged output capture.
//!
//! The target executable is started with `[fixed_args..., target]`, its
//! stdout and stderr are pointed at the same pipe so the captured text keeps
//! the interleaving the process produced, and the caller waits for it to
//! exit. With a timeout the child runs in its own process group, and the
//! whole group is killed when the deadline passes.

mod pipe;

use std::ffi::OsString;
use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use thiserror::Error;
use tokio::process::Command;
use tokio::task::{JoinError, JoinHandle};

/// Exit code reported when a status carries neither a code nor a signal.
pub const UNKNOWN_EXIT: i32 = -1;

/// Errors that keep a run from producing an exit status
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to launch {}: {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {}ms", .after.as_millis())]
    TimedOut {
        after: Duration,
        partial_output: String,
    },

    #[error("I/O error while capturing output: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Output captured before the run was cut short, if any.
    pub fn partial_output(&self) -> &str {
        match self {
            RunError::TimedOut { partial_output, .. } => partial_output,
            _ => "",
        }
    }
}

/// Exit status and combined output of one finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub raw_output: String,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launches one executable with a fixed argument list.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    executable: PathBuf,
    fixed_args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(executable: impl Into<PathBuf>, fixed_args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            fixed_args,
            timeout: None,
        }
    }

    /// Bound every run to `timeout` (`None` waits forever)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn fixed_args(&self) -> &[String] {
        &self.fixed_args
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full argument vector passed to the executable for `target`.
    pub fn command_line(&self, target: &Path) -> Vec<OsString> {
        self.fixed_args
            .iter()
            .map(OsString::from)
            .chain(std::iter::once(target.as_os_str().to_os_string()))
            .collect()
    }

    /// Run the executable against `target` and wait for it to exit.
    pub async fn run(&self, target: &Path) -> Result<RunOutcome, RunError> {
        run(&self.executable, &self.fixed_args, target, self.timeout).await
    }
}

/// Spawn `executable` with `[fixed_args..., target]`, capture its merged
/// stdout/stderr, and return its exit status.
pub async fn run(
    executable: &Path,
    fixed_args: &[String],
    target: &Path,
    timeout: Option<Duration>,
) -> Result<RunOutcome, RunError> {
    let (reader, writer) = pipe::merged_pipe().map_err(std::io::Error::from)?;
    let stderr_writer = writer.try_clone()?;

    tracing::debug!(
        executable = %executable.display(),
        args = ?fixed_args,
        path = %target.display(),
        "spawning"
    );

    // The command owns the parent's copies of the write end; dropping it at
    // the end of this block lets the reader see EOF once the child exits.
    let mut child = {
        let mut command = Command::new(executable);
        command
            .args(fixed_args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr_writer))
            .kill_on_drop(true);
        if timeout.is_some() {
            command.process_group(0);
        }
        command.spawn().map_err(|source| RunError::Spawn {
            executable: executable.to_path_buf(),
            source,
        })?
    };

    let pid = child.id();
    let mut capture = tokio::task::spawn_blocking(move || read_to_end(reader));

    // One deadline bounds both the wait and the drain of the output pipe
    let deadline = timeout.map(|limit| (limit, tokio::time::Instant::now() + limit));

    let status = match deadline {
        None => child.wait().await?,
        Some((limit, at)) => match tokio::time::timeout_at(at, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                tracing::warn!(
                    path = %target.display(),
                    timeout_ms = limit.as_millis() as u64,
                    "deadline passed, killing process group"
                );
                if let Some(pid) = pid {
                    kill_group(pid);
                }
                let _ = child.kill().await;
                let partial_output = collect(capture).await.unwrap_or_default();
                return Err(RunError::TimedOut {
                    after: limit,
                    partial_output,
                });
            }
        },
    };

    // A background process left behind by the target still holds the write
    // end of the pipe. It shares the target's process group whenever a
    // deadline is set, so the group is killed once the deadline passes.
    let joined = match deadline {
        None => capture.await,
        Some((_, at)) => match tokio::time::timeout_at(at, &mut capture).await {
            Ok(joined) => joined,
            Err(_) => {
                tracing::warn!(
                    path = %target.display(),
                    "output still open at deadline, killing leftover processes"
                );
                if let Some(pid) = pid {
                    kill_group(pid);
                }
                capture.await
            }
        },
    };

    Ok(RunOutcome {
        exit_code: exit_code(status),
        raw_output: decode(joined)?,
    })
}

/// Map an exit status to a single integer. Signal deaths follow the shell
/// convention of `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(UNKNOWN_EXIT)
}

fn kill_group(pid: u32) {
    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        tracing::debug!(pid, error = %e, "process group already gone");
    }
}

fn read_to_end(reader: std::os::fd::OwnedFd) -> std::io::Result<Vec<u8>> {
    let mut file = std::fs::File::from(reader);
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

async fn collect(capture: JoinHandle<std::io::Result<Vec<u8>>>) -> std::io::Result<String> {
    decode(capture.await)
}

fn decode(joined: Result<std::io::Result<Vec<u8>>, JoinError>) -> std::io::Result<String> {
    let bytes = joined.map_err(std::io::Error::other)??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
