//! Ansible playbook adapter — command construction and execution.
//!
//! Routes every ansible-playbook invocation through a [`CommandRunner`],
//! generic over `R` so tests can inject a mock runner without spawning
//! real processes.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::command_runner::CommandRunner;
use crate::domain::Target;
use crate::domain::error::ConfigError;

/// External orchestrator binary, resolved via PATH.
pub const ANSIBLE_PLAYBOOK_BIN: &str = "ansible-playbook";

/// Playbook path, relative to the project root.
pub const PLAYBOOK_PATH: &str = "ansible/deploy.yml";

/// Infrastructure adapter wrapping the ansible-playbook CLI.
pub struct AnsibleRunner<R: CommandRunner> {
    runner: R,
    /// Project root the file checks run against. Deploy arguments stay
    /// relative so the invocation matches what an operator would type.
    root: PathBuf,
}

impl<R: CommandRunner> AnsibleRunner<R> {
    pub fn new(runner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }

    /// Absolute-or-relative path of the deploy playbook under the root.
    #[must_use]
    pub fn playbook_path(&self) -> PathBuf {
        self.root.join(PLAYBOOK_PATH)
    }

    /// Inventory file for a target: `ansible/<target>_hosts` under the root.
    #[must_use]
    pub fn inventory_path(&self, target: &Target) -> PathBuf {
        self.root.join("ansible").join(format!("{target}_hosts"))
    }

    /// Argument vector for the deploy invocation:
    /// `ansible/deploy.yml -i ansible/<target>_hosts`.
    #[must_use]
    pub fn deploy_args(target: &Target) -> Vec<String> {
        vec![
            PLAYBOOK_PATH.to_string(),
            "-i".to_string(),
            format!("ansible/{target}_hosts"),
        ]
    }

    /// Verify the playbook and the target's inventory exist before any
    /// subprocess is spawned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PlaybookMissing` or
    /// `ConfigError::InventoryMissing`.
    pub fn check_preconditions(&self, target: &Target) -> Result<()> {
        let playbook = self.playbook_path();
        if !playbook.is_file() {
            return Err(ConfigError::PlaybookMissing(playbook).into());
        }
        let inventory = self.inventory_path(target);
        if !inventory.is_file() {
            return Err(ConfigError::InventoryMissing {
                target: target.to_string(),
                path: inventory,
            }
            .into());
        }
        Ok(())
    }

    /// Run the deploy playbook against `target` with inherited stdio,
    /// blocking until the child exits. Exactly one invocation; the external
    /// tool owns all deployment semantics and failure recovery.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be spawned or waited on. A
    /// non-zero exit is NOT an error here — the status is returned for the
    /// caller to propagate.
    pub async fn deploy(&self, target: &Target) -> Result<ExitStatus> {
        let args = Self::deploy_args(target);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run_status(ANSIBLE_PLAYBOOK_BIN, &args).await
    }

    /// Probe `ansible-playbook --version`, bounded by the runner's timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary cannot be spawned or the probe times
    /// out.
    pub async fn probe_version(&self) -> Result<Output> {
        self.runner.run(ANSIBLE_PLAYBOOK_BIN, &["--version"]).await
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
