//! Shipit CLI - configuration-driven deploys via ansible-playbook

use std::process::ExitCode;

use clap::Parser as _;

use shipit_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
