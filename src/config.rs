//! Configuration loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

/// Locations of the trained artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the serialized network weights
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,

    /// Path to the serialized scaler parameters
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
}

fn default_weights_path() -> PathBuf {
    PathBuf::from("/var/lib/connclass/model.bin")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("/var/lib/connclass/scaler.bin")
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
            scaler_path: default_scaler_path(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Load config from default locations or fall back to defaults
    pub fn load_or_default() -> Result<Self> {
        let paths = [
            PathBuf::from("/etc/connclass/config.toml"),
            dirs_next::config_dir()
                .map(|p| p.join("connclass/config.toml"))
                .unwrap_or_default(),
            PathBuf::from("config.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }
}
