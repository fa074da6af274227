//! Engine configuration
//!
//! Rule parameters for one game. Every field has a default, so a JSON config
//! only needs the fields it changes:
//!
//! ```
//! use gem_cascade_core::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "width": 6, "palette_size": 4 }"#).unwrap();
//! assert_eq!(config.width, 6);
//! assert_eq!(config.height, 8);
//! assert_eq!(config.min_run, 3);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_HEIGHT, DEFAULT_MAX_CASCADES, DEFAULT_MIN_RUN, DEFAULT_PALETTE_SIZE, DEFAULT_WIDTH,
    MATCH_POINTS, MAX_PALETTE_SIZE,
};

/// Errors that can occur when building or loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },

    #[error("min_run must be at least 2 (got {0})")]
    MinRunTooSmall(usize),

    #[error("palette_size {palette_size} is smaller than min_run {min_run}")]
    PaletteTooSmall { palette_size: u8, min_run: usize },

    #[error("palette_size {0} exceeds the maximum of 26")]
    PaletteTooLarge(u8),

    #[error("max_cascades must be positive")]
    NoCascadeBudget,

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Number of distinct tile types
    pub palette_size: u8,
    /// Shortest run that counts as a match
    pub min_run: usize,
    /// Points per removed tile
    pub match_points: u32,
    /// Cascade steps allowed per resolution call before it is abandoned
    pub max_cascades: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette_size: DEFAULT_PALETTE_SIZE,
            min_run: DEFAULT_MIN_RUN,
            match_points: MATCH_POINTS,
            max_cascades: DEFAULT_MAX_CASCADES,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_run < 2 {
            return Err(ConfigError::MinRunTooSmall(self.min_run));
        }
        if (self.palette_size as usize) < self.min_run {
            return Err(ConfigError::PaletteTooSmall {
                palette_size: self.palette_size,
                min_run: self.min_run,
            });
        }
        if self.palette_size > MAX_PALETTE_SIZE {
            return Err(ConfigError::PaletteTooLarge(self.palette_size));
        }
        if self.max_cascades == 0 {
            return Err(ConfigError::NoCascadeBudget);
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
