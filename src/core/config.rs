//! Run configuration with documented defaults
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every field has a default, so a
//! TOML file only needs to name what it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScatterError};
use crate::core::types::Size;
use crate::layout::placement::{CountRange, DEFAULT_MAX_RETRIES};

/// Top-level configuration for a drawing session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub session: SessionConfig,
    pub layout: LayoutConfig,
    pub erase: EraseConfig,
    pub simulation: SimulationConfig,
}

/// The drawing each session starts, and where its reference screenshots live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Paper width of the new drawing in pixels
    pub paper_width: i32,

    /// Paper height of the new drawing in pixels
    pub paper_height: i32,

    /// Directory of saved screenshots
    ///
    /// When set, squares are also counted against the preset template found
    /// under `shapes/` here, and erasing targets that template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            paper_width: 2560,
            paper_height: 1440,
            screenshots_dir: None,
        }
    }
}

impl SessionConfig {
    pub fn paper_size(&self) -> Result<Size> {
        Size::new(self.paper_width, self.paper_height)
    }

    /// Saved screenshot of one square of `size` drawn with `brush_size`
    pub fn preset_template(&self, brush_size: u32, size: Size) -> Option<PathBuf> {
        self.screenshots_dir.as_ref().map(|dir| {
            dir.join("shapes").join(format!(
                "square_freehand_{}_{}_{}_black_on_white.png",
                brush_size,
                size.width(),
                size.height()
            ))
        })
    }
}

/// How many shapes to place and how large they are
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Smallest number of shapes drawn per session
    pub min_shapes: usize,

    /// Largest number of shapes drawn per session (inclusive)
    ///
    /// When lower than `min_shapes` the range collapses to `min_shapes` with
    /// a warning instead of failing validation.
    pub max_shapes: usize,

    /// Shape footprint width in pixels
    pub shape_width: i32,

    /// Shape footprint height in pixels
    pub shape_height: i32,

    /// Consecutive collisions tolerated while placing one shape
    ///
    /// Shapes are few and small next to the canvas, so a hundred misses in a
    /// row almost always means the canvas is genuinely too crowded.
    pub max_retries: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_shapes: 2,
            max_shapes: 5,
            shape_width: 100,
            shape_height: 100,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LayoutConfig {
    pub fn shape_size(&self) -> Result<Size> {
        Size::new(self.shape_width, self.shape_height)
    }

    pub fn count_range(&self) -> CountRange {
        CountRange::new(self.min_shapes, self.max_shapes)
    }
}

/// Bounds on the scribble-until-gone loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraseConfig {
    /// Wall-clock budget in seconds
    ///
    /// Against a real application each stroke is a mouse drag of a few
    /// hundred milliseconds, so 240 seconds allows several hundred strokes.
    pub timeout_secs: f64,
}

impl Default for EraseConfig {
    fn default() -> Self {
        Self { timeout_secs: 240.0 }
    }
}

impl EraseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Parameters of the in-memory desktop used by the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Brush diameter reported by the simulated application
    pub brush_size: u32,

    /// Strokes that must cross a drawn shape before it stops matching
    pub strokes_to_obscure: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            brush_size: 40,
            strokes_to_obscure: 3,
        }
    }
}

impl ScatterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing tables and keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let size = self.layout.shape_size()?;

        // Shapes thinner than the brush turn into blobs that never match
        let brush = self.simulation.brush_size as i64;
        if (size.width() as i64) < brush || (size.height() as i64) < brush {
            return Err(ScatterError::InvalidConfig(format!(
                "shape size {} is smaller than brush size {}",
                size, self.simulation.brush_size
            )));
        }

        if !(self.erase.timeout_secs.is_finite() && self.erase.timeout_secs > 0.0) {
            return Err(ScatterError::InvalidConfig(format!(
                "timeout_secs ({}) must be a positive number",
                self.erase.timeout_secs
            )));
        }

        self.session.paper_size()?;

        if self.simulation.strokes_to_obscure == 0 {
            return Err(ScatterError::InvalidConfig(
                "strokes_to_obscure must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
