//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::output::json;

/// Configuration-driven deploys via ansible-playbook
#[derive(Parser)]
#[command(
    name = "shipit",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the deploy playbook against a target environment
    Deploy(commands::deploy::DeployArgs),

    /// Show or set the default deploy target
    #[command(subcommand)]
    Target(commands::target::TargetCommand),

    /// Diagnose the deploy environment
    Doctor,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails. In `--json` mode the error is
    /// rendered as a JSON object on stdout instead and the exit code is 1.
    pub async fn run(self) -> Result<ExitCode> {
        let json = self.json;
        match self.dispatch().await {
            Ok(code) => Ok(code),
            Err(e) if json => {
                println!("{}", json::format_error(&format!("{e:#}"), "error")?);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        }
    }

    async fn dispatch(self) -> Result<ExitCode> {
        let Cli { json, quiet, no_color, yes, command } = self;
        let flags = AppFlags { json, quiet, no_color, yes };

        match command {
            Command::Version => Ok(commands::version::run(json)),
            Command::Deploy(args) => {
                let app = AppContext::new(&flags)?;
                commands::deploy::run(&args, &app).await
            }
            Command::Target(cmd) => {
                let app = AppContext::new(&flags)?;
                commands::target::run(&app, cmd)
            }
            Command::Doctor => {
                let app = AppContext::new(&flags)?;
                commands::doctor::run(&app).await
            }
        }
    }
}
