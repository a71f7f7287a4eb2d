//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Configuration errors ─────────────────────────────────────────────────────

/// Errors related to target selection and the deploy file tree.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid target '{0}': must match ^[a-z0-9][a-z0-9_-]*$")]
    InvalidTarget(String),

    #[error("Playbook not found: {0}\nRun shipit from the project root.")]
    PlaybookMissing(PathBuf),

    #[error(
        "Inventory not found for target '{target}': {path}\nCreate it or pick another target with --target."
    )]
    InventoryMissing { target: String, path: PathBuf },
}

// ── External process errors ──────────────────────────────────────────────────

/// Errors related to the external playbook process.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {program}: {source}\nIs it installed and on PATH?")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },

    #[error("{program} was terminated by a signal")]
    Interrupted { program: String },
}
