use glam::Vec2;
use hexlights::{GridError, VectorColor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{BoardError, DEFAULT_LAYOUT};

/// Puzzle settings. Loaded from JSON at runtime; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    /// Hexagon circumradius in pixels.
    pub radius: f32,
    /// Offset of the board's top-left from the surface origin.
    pub origin: [f32; 2],
    /// Outline width in pixels. Zero disables outlines.
    pub line_width: f32,
    pub on_color: [u8; 3],
    pub off_color: [u8; 3],
    pub line_color: [u8; 3],
    /// Rows of cell codes: `1` lit, `0` unlit, `-1` hole.
    pub layout: Vec<Vec<i8>>,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            origin: [0.0, 10.0],
            line_width: 2.0,
            on_color: [144, 238, 144],  // light green
            off_color: [245, 245, 245], // white smoke
            line_color: [0, 0, 0],
            layout: DEFAULT_LAYOUT.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("line width must be finite and non-negative, got {0}")]
    LineWidth(f32),
    #[error("origin must be finite, got {0:?}")]
    Origin([f32; 2]),
}

impl LightsConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the drawing parameters. Radius and layout are checked when the grid and
    /// board are built from them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.line_width.is_finite() || self.line_width < 0.0 {
            return Err(ConfigError::LineWidth(self.line_width));
        }
        if !self.origin.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Origin(self.origin));
        }
        Ok(())
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::from(self.origin)
    }

    pub fn on_color(&self) -> VectorColor {
        self.on_color.into()
    }

    pub fn off_color(&self) -> VectorColor {
        self.off_color.into()
    }

    pub fn line_color(&self) -> VectorColor {
        self.line_color.into()
    }
}
