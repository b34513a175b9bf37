use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gesture::SwipeConfig;

/// Size of one tile on screen, in terminal cells (border included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSize {
    pub width: u16,
    pub height: u16,
}

impl Default for TileSize {
    fn default() -> Self {
        Self { width: 5, height: 3 }
    }
}

/// Color overrides; values are color names (`gray`, `lightblue`) or `#rrggbb`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Template file to load instead of the built-in 10x10 layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Write logs here instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default)]
    pub tile: TileSize,

    /// Pointer sources and swipe threshold
    #[serde(default)]
    pub swipe: SwipeConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("swaptile");

        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Could not create config directory {}", config_dir.display())
        })?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the user's config directory, creating a default one
    /// when none exists.
    ///
    /// Errors are returned rather than logged so the caller can report them
    /// once logging is set up and fall back to [`AppConfig::default`].
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = AppConfig::default();
            config
                .save_to(path)
                .with_context(|| format!("Failed to write default config {}", path.display()))?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;

        // Tiles are at least one cell in each direction
        config.tile.width = config.tile.width.max(1);
        config.tile.height = config.tile.height.max(1);
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
