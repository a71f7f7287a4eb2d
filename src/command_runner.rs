//! Generic external command execution with timeout and guaranteed kill.

use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt as _;

use crate::domain::error::ProcessError;

/// Default timeout for short probe commands (`ansible-playbook --version`).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Command execution abstraction.
///
/// This trait is NOT tied to ansible — it can run any external command.
/// The production implementation uses tokio; test doubles can return
/// canned results without spawning processes.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a command with the default timeout, capturing stdout/stderr.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a command with a custom timeout (overrides default).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;

    /// Run a command with inherited stdio (interactive pass-through).
    /// No timeout — the caller blocks until the child exits.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

/// Production `CommandRunner` backed by `tokio::process`.
///
/// A plain `tokio::time::timeout` around `.output().await` does not kill the
/// child on all platforms when the timeout fires — the future is dropped but
/// the OS process keeps running. `run_with_timeout` therefore uses
/// `tokio::select!` with an explicit `child.kill()`.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Drain an optional pipe to a buffer. Read errors yield partial output.
async fn drain<R: tokio::io::AsyncRead + Unpin>(handle: Option<&mut R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(h) = handle {
        let _ = h.read_to_end(&mut buf).await;
    }
    buf
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // stdout/stderr must be drained CONCURRENTLY with wait(): a child
        // writing more than the OS pipe buffer blocks on write, and a bare
        // wait() would never resolve.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    drain(stdout_handle.as_mut()),
                    drain(stderr_handle.as_mut()),
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                Err(ProcessError::TimedOut {
                    program: program.to_string(),
                    secs: timeout.as_secs(),
                }
                .into())
            }
        }
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
