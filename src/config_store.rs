//! Config persistence — YAML file on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::ShipitConfig;

/// Config persistence contract. Test doubles can serve canned configs
/// without touching the filesystem.
pub trait ConfigStore {
    /// Load the config, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<ShipitConfig>;

    /// Persist the config, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &ShipitConfig) -> Result<()>;

    /// Path of the backing config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

/// Production `ConfigStore` that uses a YAML file on disk.
///
/// The path is `~/.shipit/config.yaml`, overridable via the `SHIPIT_CONFIG`
/// environment variable (used by tests and scripting).
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ShipitConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(ShipitConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &ShipitConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("SHIPIT_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".shipit").join("config.yaml"))
    }
}
