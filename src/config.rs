//! Application configuration loaded from an optional TOML file

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StitchError, StitchResult};

/// Tunable settings for the editor and its collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Approximate number of thumbnails sampled across the asset
    pub thumbnail_count: u32,
    /// Thumbnail raster width in pixels
    pub thumbnail_width: u32,
    /// Thumbnail raster height in pixels
    pub thumbnail_height: u32,
    /// Transcoding engine binary name or path
    pub engine_binary: String,
    /// Metadata probe binary name or path
    pub probe_binary: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thumbnail_count: 10,
            thumbnail_width: 160,
            thumbnail_height: 90,
            engine_binary: "ffmpeg".to_string(),
            probe_binary: "ffprobe".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> StitchResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| StitchError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| StitchError::Config {
            message: format!("cannot parse {}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> StitchResult<()> {
        if self.thumbnail_count == 0 {
            return Err(StitchError::Config {
                message: "thumbnail_count must be at least 1".to_string(),
            });
        }
        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(StitchError::Config {
                message: "thumbnail raster dimensions must be non-zero".to_string(),
            });
        }
        if self.engine_binary.is_empty() || self.probe_binary.is_empty() {
            return Err(StitchError::Config {
                message: "engine and probe binaries must be named".to_string(),
            });
        }
        Ok(())
    }
}
