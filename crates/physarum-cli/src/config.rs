//! Configuration management for Physarum CLI.

use anyhow::{Context, Result};
use physarum::prelude::{Preset, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "physarum.toml";

/// Physarum project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for frame folders. Frames are only written when set.
    #[serde(default)]
    pub frames_dir: Option<String>,
    /// Frames go to `<frames_dir>/sim_<token>`.
    #[serde(default = "default_token")]
    pub token: u32,
    #[serde(default)]
    pub summary: Option<String>,
}

fn default_token() -> u32 { 0 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frames_dir: None,
            token: default_token(),
            summary: None,
        }
    }
}

impl Config {
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            simulation: SimulationConfig::from_preset(preset),
            output: OutputConfig::default(),
        }
    }

    /// Load config from physarum.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => {
                debug!("Using config {}", path.display());
                Self::load_from(&path)
            }
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find physarum.toml in current or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let dir = std::env::current_dir().ok()?;
    find_config_from(dir)
}

fn find_config_from(mut dir: PathBuf) -> Option<PathBuf> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::for_preset(Preset::PixelGrid);
        config.simulation.seed = Some(12);
        config.output.frames_dir = Some("frames".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.simulation, config.simulation);
        assert_eq!(loaded.output.frames_dir.as_deref(), Some("frames"));
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[simulation]\nsteps = 25\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.simulation.steps, 25);
        assert_eq!(loaded.simulation.agent_count, SimulationConfig::default().agent_count);
        assert_eq!(loaded.output.token, 0);
        assert!(loaded.output.frames_dir.is_none());
    }

    #[test]
    fn discovery_walks_up_to_parent() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "").unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_from(nested).unwrap();
        assert_eq!(found, root.path().join(CONFIG_FILE));
    }
}
