// src/infrastructure/config.rs
use crate::constants::DEFAULT_MODEL;
use crate::domain::Language;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration, `~/.config/karten/config.toml` by default
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub kindle: KindleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Defaults {
    #[serde(default)]
    pub lang: Language,
    #[serde(default = "default_model")]
    pub model: String,
    /// Deck file, `-` for standard output
    #[serde(default = "default_file")]
    pub file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct KindleConfig {
    /// Kindle mount point, empty if unset
    #[serde(default)]
    pub dir: String,
}

fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_file() -> String { "-".to_string() }

impl Default for Defaults {
    fn default() -> Self {
        Self {
            lang: Language::default(),
            model: default_model(),
            file: default_file(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to TOML file, creating missing parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Write the built-in defaults to `path`. An existing file is only
    /// replaced with `force`.
    pub fn create_default(path: impl AsRef<Path>, force: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() && !force {
            bail!(
                "Config file {} already exists, use --force to replace it",
                path.display()
            );
        }
        let config = Self::default();
        config.save(path)?;
        debug!(?path, "Wrote default config");
        Ok(config)
    }

    /// Load an explicitly given file, else the default location if present,
    /// else built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("karten").join("config.toml"))
    }

    /// Configured Kindle mount point
    pub fn kindle_dir(&self) -> Option<PathBuf> {
        (!self.kindle.dir.is_empty()).then(|| PathBuf::from(&self.kindle.dir))
    }
}
