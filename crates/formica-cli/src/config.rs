//! Configuration management for Formica CLI.

use anyhow::{Context, Result};
use formica_core::config::AgentConfig;
use formica_core::types::Role;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "formica.toml";

/// Formica project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub replay: ReplayConfig,
    /// Tuning of every agent the CLI creates.
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Role used when neither the command line nor the script names one.
    #[serde(default = "default_role")]
    pub role: Role,
    /// Seed for the replayed agent's ID.
    #[serde(default = "default_agent_seed")]
    pub agent_seed: u64,
}

fn default_role() -> Role { Role::Forager }
fn default_agent_seed() -> u64 { 1 }

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            role: default_role(),
            agent_seed: default_agent_seed(),
        }
    }
}

impl Config {
    /// Load config from formica.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let start = std::env::current_dir().context("Failed to read current directory")?;
        match find_config_file(&start) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::load_from(&path)
            }
            None => {
                debug!("no {} found, using defaults", CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }

    /// Load and validate config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .agent
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Find formica.toml in `start` or its parent directories.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
