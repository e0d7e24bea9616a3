use std::path::Path;

use log::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_COLS, DEFAULT_ROWS};

/// Largest accepted board side.
pub const MAX_BOARD_SIDE: usize = 64;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub ai: AiConfig,
    pub ui: UiConfig,
}

/// Grid dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
        }
    }
}

/// Computer opponent settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Plies searched per computer move.
    pub depth: usize,
    /// Seed for move-order shuffling; random when absent.
    pub seed: Option<u64>,
    /// The computer plays Red and moves first.
    pub ai_starts: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            depth: 6,
            seed: None,
            ai_starts: false,
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Terminal columns per board cell, also the mouse hit width.
    pub cell_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { cell_width: 3 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 || self.board.width > MAX_BOARD_SIDE {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [1, {MAX_BOARD_SIDE}]"
            )));
        }
        if self.board.height == 0 || self.board.height > MAX_BOARD_SIDE {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [1, {MAX_BOARD_SIDE}]"
            )));
        }
        if self.ai.depth == 0 {
            return Err(ConfigError::Validation("ai.depth must be >= 1".into()));
        }
        if self.ui.cell_width == 0 {
            return Err(ConfigError::Validation("ui.cell_width must be > 0".into()));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
