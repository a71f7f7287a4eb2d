//! Version command

use std::process::ExitCode;

/// Run the version command.
#[must_use]
pub fn run(json: bool) -> ExitCode {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        println!("shipit {version}");
    }
    ExitCode::SUCCESS
}
