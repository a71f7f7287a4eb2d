//! `shipit deploy` — run the deploy playbook against a target environment.

use std::process::{ExitCode, ExitStatus};

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::config_store::ConfigStore as _;
use crate::domain::Target;
use crate::domain::error::ProcessError;
use crate::playbook::ANSIBLE_PLAYBOOK_BIN;

/// Arguments for the deploy command.
#[derive(Args, Default)]
pub struct DeployArgs {
    /// Target environment (overrides the configured default)
    #[arg(long)]
    pub target: Option<String>,
}

/// Run `shipit deploy`.
///
/// Resolves the target at call time (flag, then config file, then the
/// built-in `production` default), verifies the playbook and inventory
/// exist, then hands off to ansible-playbook with inherited stdio. The
/// child's exit code becomes the CLI's exit code; no retries.
///
/// # Errors
///
/// Returns an error if target resolution or a precondition check fails
/// (no subprocess is spawned in either case), if the child cannot be
/// spawned, or if it is killed by a signal.
pub async fn run(args: &DeployArgs, app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let (target, source) =
        Target::resolve(args.target.as_deref(), config.deploy.target.as_deref())?;

    app.ansible.check_preconditions(&target)?;

    if !app.confirm(&format!("Deploy to '{target}'?"), true)? {
        app.output.warn("Deploy aborted.");
        return Ok(ExitCode::FAILURE);
    }

    app.output.kv("Target", &format!("{target} ({source})"));
    app.output
        .kv("Inventory", &app.ansible.inventory_path(&target).display().to_string());

    let status = app.ansible.deploy(&target).await?;
    finish(app, status)
}

/// Map the child's exit status to the CLI exit code.
fn finish(app: &AppContext, status: ExitStatus) -> Result<ExitCode> {
    if status.success() {
        app.output.success("Deploy complete.");
        return Ok(ExitCode::SUCCESS);
    }
    match status.code() {
        Some(code) => {
            app.output
                .error(&format!("{ANSIBLE_PLAYBOOK_BIN} exited with status {code}"));
            Ok(ExitCode::from(propagated_exit_code(code)))
        }
        // No code means the child was killed by a signal.
        None => Err(ProcessError::Interrupted {
            program: ANSIBLE_PLAYBOOK_BIN.to_string(),
        }
        .into()),
    }
}

/// Clamp a child exit code into the `ExitCode` range. Out-of-range codes
/// (shells use >255 for signal deaths) collapse to the generic failure code.
fn propagated_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
