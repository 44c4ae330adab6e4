use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::autoroute::LayerStructure;
use crate::display::CursorStyle;
use crate::error::{ConfigError, Result};

const CONFIG_FILE_NAME: &str = "session_config.json";

/// Startup configuration of a board session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub window_size: [f32; 2],

    /// Layer stackup used when no board is loaded
    pub layer_structure: LayerStructure,

    /// Design box of the board, lower left and upper right corner in mm
    pub board_min: [f64; 2],
    pub board_max: [f64; 2],

    /// Size of the scrollable drawing surface in pixels
    pub surface_size: [f64; 2],

    pub dim_factor: f64,
    pub cursor_style: CursorStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: [1280.0, 768.0],
            layer_structure: LayerStructure::default_two_layer(),
            board_min: [0.0, 0.0],
            board_max: [100.0, 80.0],
            surface_size: [2000.0, 1600.0],
            dim_factor: 0.7,
            cursor_style: CursorStyle::Small,
        }
    }
}

impl SessionConfig {
    /// Default config directory, `<config dir>/routeforge`
    pub fn default_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("routeforge"))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn save_to_file(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| ConfigError::Io { path, source })?;
        Ok(())
    }

    /// Load the config from `dir`, falling back to defaults if there is none yet
    pub fn load_from_file(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::info!("No session config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }
}
