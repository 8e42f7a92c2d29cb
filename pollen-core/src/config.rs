use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Fallback location when neither the environment nor the config file
/// supplies one.
pub const DEFAULT_ZIP: &str = "37203";

/// Environment override for the default location; checked before the
/// config file.
pub const ZIP_ENV_VAR: &str = "POLLEN_ZIP";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// default_zip = "37206"
    pub default_zip: Option<String>,
}

impl Config {
    /// Location to use when the command carries no ZIP code.
    ///
    /// Precedence: `POLLEN_ZIP` environment variable, then the config
    /// file, then the built-in fallback. The value is passed through
    /// unvalidated, matching the command path where the dispatcher has
    /// already matched the digits.
    pub fn resolve_default_zip(&self) -> String {
        resolve_default(env::var(ZIP_ENV_VAR).ok(), self.default_zip.as_deref())
    }

    /// Store the default ZIP code.
    pub fn set_default_zip(&mut self, zip: String) {
        self.default_zip = Some(zip);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "pollen-bot", "pollen-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn resolve_default(env_zip: Option<String>, configured: Option<&str>) -> String {
    if let Some(zip) = env_zip.filter(|zip| !zip.is_empty()) {
        return zip;
    }
    if let Some(zip) = configured {
        return zip.to_string();
    }
    DEFAULT_ZIP.to_string()
}
