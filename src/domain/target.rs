//! Deploy target identifier and the call-time default policy.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::domain::error::ConfigError;

/// Target used when neither the CLI flag nor the config file names one.
pub const DEFAULT_TARGET: &str = "production";

/// A validated deploy target name (e.g. `production`, `staging`).
///
/// Target names select an inventory file (`ansible/<name>_hosts`), so the
/// charset is restricted to what is safe in a file name: lowercase
/// alphanumerics, `-` and `_`, starting with an alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

/// Where a resolved target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    /// `--target` CLI flag.
    Flag,
    /// `deploy.target` in the config file.
    ConfigFile,
    /// Built-in default (`production`).
    BuiltinDefault,
}

impl Target {
    /// Validate and wrap a target name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTarget` if the name is empty or contains
    /// characters outside `[a-z0-9_-]`.
    pub fn new(name: &str) -> Result<Self> {
        if !is_valid_name(name) {
            return Err(ConfigError::InvalidTarget(name.to_string()).into());
        }
        Ok(Self(name.to_string()))
    }

    /// Resolve the effective target at call time.
    ///
    /// Precedence: CLI flag, then configured default, then the built-in
    /// default `production`. Nothing is resolved at startup — an unset
    /// config is simply the built-in default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTarget` if the winning candidate fails
    /// validation (e.g. an empty string in the config file).
    pub fn resolve(flag: Option<&str>, configured: Option<&str>) -> Result<(Self, TargetSource)> {
        if let Some(name) = flag {
            return Ok((Self::new(name)?, TargetSource::Flag));
        }
        if let Some(name) = configured {
            return Ok((Self::new(name)?, TargetSource::ConfigFile));
        }
        Ok((Self::default(), TargetSource::BuiltinDefault))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Target {
    fn default() -> Self {
        Self(DEFAULT_TARGET.to_string())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "--target flag",
            Self::ConfigFile => "config file",
            Self::BuiltinDefault => "built-in default",
        })
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_lowercase() || first.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

// ── Unit tests ───────────────────────────────────────────────────────────────
