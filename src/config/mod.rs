use crate::core::path::{config_file, ensure_dir};
use crate::core::{UpmError, UpmResult};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Feed written into every generated manifest alongside any feeds
    /// migrated from a legacy source config
    #[serde(default = "default_feed_url")]
    pub default_feed_url: String,

    /// Command run when converting with --install; the manifest path is
    /// appended as its final argument
    #[serde(default = "default_install_command")]
    pub install_command: String,
}

fn default_feed_url() -> String {
    "https://api.nuget.org/v3/index.json".to_string()
}

fn default_install_command() -> String {
    "upm-restore".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_feed_url: default_feed_url(),
            install_command: default_install_command(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, creating the default
    /// if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\upm\config.yaml
    /// - Linux: ~/.config/upm/config.yaml
    /// - macOS: ~/Library/Application Support/upm/config.yaml
    pub fn load() -> UpmResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| UpmError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to the platform config directory
    pub fn save(&self) -> UpmResult<()> {
        let config_path = config_file()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| UpmError::Path("Config file has no parent directory".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| UpmError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)?;
        Ok(())
    }
}
