//! `shipit target` — show and set the default deploy target.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::config_store::ConfigStore as _;
use crate::domain::Target;

/// Target subcommands.
#[derive(Subcommand)]
pub enum TargetCommand {
    /// Show the effective deploy target and where it comes from
    Show,
    /// Set the default deploy target
    Set {
        /// Target name (e.g. production, staging)
        name: String,
    },
}

/// Run the target command.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or if
/// the target name fails validation.
pub fn run(app: &AppContext, cmd: TargetCommand) -> Result<ExitCode> {
    match cmd {
        TargetCommand::Show => show(app),
        TargetCommand::Set { name } => set(app, &name),
    }
}

fn show(app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let (target, source) = Target::resolve(None, config.deploy.target.as_deref())?;

    if app.is_json() {
        let obj = serde_json::json!({
            "target": target.as_str(),
            "source": source.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        app.output.kv("Target", &format!("{target} ({source})"));
        app.output
            .kv("Config", &app.config_store.path()?.display().to_string());
        app.output.kv("Override", "SHIPIT_CONFIG");
    }
    Ok(ExitCode::SUCCESS)
}

fn set(app: &AppContext, name: &str) -> Result<ExitCode> {
    // Validate before touching the config file.
    let target = Target::new(name)?;

    let mut config = app.config_store.load()?;
    config.deploy.target = Some(target.as_str().to_string());
    app.config_store.save(&config)?;

    app.output
        .success(&format!("Default target set to '{target}'"));
    Ok(ExitCode::SUCCESS)
}
