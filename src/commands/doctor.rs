//! `shipit doctor` — diagnose the deploy environment without deploying.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::config_store::ConfigStore as _;
use crate::domain::Target;
use crate::playbook::ANSIBLE_PLAYBOOK_BIN;

/// Run `shipit doctor`.
///
/// Checks that ansible-playbook is reachable, the playbook exists, and the
/// effective target has an inventory. Exits non-zero if any check fails.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or carries an
/// invalid target.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let (target, source) = Target::resolve(None, config.deploy.target.as_deref())?;
    let ctx = &app.output;
    let mut healthy = true;

    match app.ansible.probe_version().await {
        Ok(out) if out.status.success() => {
            let banner = String::from_utf8_lossy(&out.stdout);
            let first_line = banner.lines().next().unwrap_or(ANSIBLE_PLAYBOOK_BIN);
            ctx.success(&format!("{first_line} on PATH"));
        }
        _ => {
            healthy = false;
            ctx.error(&format!("{ANSIBLE_PLAYBOOK_BIN} not found on PATH"));
        }
    }

    let playbook = app.ansible.playbook_path();
    if playbook.is_file() {
        ctx.success(&format!("playbook present: {}", playbook.display()));
    } else {
        healthy = false;
        ctx.error(&format!("playbook missing: {}", playbook.display()));
    }

    let inventory = app.ansible.inventory_path(&target);
    if inventory.is_file() {
        ctx.success(&format!(
            "inventory present for '{target}' ({source}): {}",
            inventory.display()
        ));
    } else {
        healthy = false;
        ctx.error(&format!(
            "inventory missing for '{target}' ({source}): {}",
            inventory.display()
        ));
    }

    if healthy {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
