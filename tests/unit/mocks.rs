//! Shared mock infrastructure for unit tests.
//!
//! Provides canned [`CommandRunner`] implementations so each test file
//! doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::os::unix::process::ExitStatusExt as _;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use shipit_cli::command_runner::CommandRunner;

/// Build an `ExitStatus` with the given exit code.
pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// One recorded invocation: program plus argument vector.
pub type Call = (String, Vec<String>);

/// Shared invocation log. The test keeps one handle, the mock the other,
/// so calls stay observable after the mock moves into an `AnsibleRunner`.
pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// `CommandRunner` that records every invocation and answers with a fixed
/// exit code. Never spawns a process.
pub struct RecordingRunner {
    exit_code: i32,
    calls: CallLog,
}

impl RecordingRunner {
    /// Create a runner answering with `exit_code`, plus the log handle.
    pub fn with_exit(exit_code: i32) -> (Self, CallLog) {
        let calls = CallLog::default();
        (
            Self {
                exit_code,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn record(&self, program: &str, args: &[&str]) {
        self.calls.lock().expect("mock lock").push((
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ));
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.record(program, args);
        Ok(Output {
            status: exit_status(self.exit_code),
            stdout: b"ansible-playbook [core 2.16.4]".to_vec(),
            stderr: Vec::new(),
        })
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.run(program, args).await
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.record(program, args);
        Ok(exit_status(self.exit_code))
    }
}

/// `CommandRunner` whose every call fails as if the binary were absent.
pub struct SpawnFailRunner;

impl CommandRunner for SpawnFailRunner {
    async fn run(&self, program: &str, _args: &[&str]) -> Result<Output> {
        anyhow::bail!("failed to launch {program}: No such file or directory")
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.run(program, args).await
    }

    async fn run_status(&self, program: &str, _args: &[&str]) -> Result<ExitStatus> {
        anyhow::bail!("failed to launch {program}: No such file or directory")
    }
}
