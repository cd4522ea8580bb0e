//! Configuration management for X-Neu CLI
//!
//! Stores the database URL and calendar offset in ~/.config/xneu/config.toml.
//! Environment variables take precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use xneu_gamification::GamificationConfig;

const CONFIG_DIR: &str = "xneu";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Engine settings: environment first, then this file
    pub fn effective(&self) -> Result<GamificationConfig> {
        self.effective_with(|key| std::env::var(key).ok())
    }

    fn effective_with<F>(&self, env: F) -> Result<GamificationConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        GamificationConfig::from_lookup(|key| {
            env(key).or_else(|| match key {
                "DATABASE_URL" => self.database_url.clone(),
                "XNEU_UTC_OFFSET_MINUTES" => self.utc_offset_minutes.map(|m| m.to_string()),
                _ => None,
            })
        })
    }
}
