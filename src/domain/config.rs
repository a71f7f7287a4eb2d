//! Config schema for `~/.shipit/config.yaml`.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `~/.shipit/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShipitConfig {
    /// Deploy settings.
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Deploy configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeployConfig {
    /// Default deploy target. `None` means the built-in default
    /// (`production`) applies at deploy time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

// ── Unit tests ───────────────────────────────────────────────────────────────
