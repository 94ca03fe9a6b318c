//! Sky chart configuration.
//!
//! Collects the empirically chosen constants of the viewer (grid size,
//! magnitude cutoff line, zoom limits, turn step) in one serde struct so
//! they can be tuned from a JSON file. The defaults reproduce the classic
//! 100x50 console chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Character grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl GridSize {
    pub fn from_width_height(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Screen center as (x, y)
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Radius of the visible sky disk in rows
    pub fn disk_radius(&self) -> f64 {
        self.height as f64 / 2.0
    }

    /// Horizontal stretch applied to keep the sky disk round.
    ///
    /// Console cells are roughly twice as tall as they are wide.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// True when (x, y) addresses a cell of this grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::from_width_height(100, 50)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Linear faint-star cutoff: `cutoff = base - slope * field_of_view`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnitudeLimit {
    pub base: f64,
    pub slope: f64,
}

impl MagnitudeLimit {
    /// Faintest magnitude drawn at the given field of view
    pub fn cutoff(&self, field_of_view: f64) -> f64 {
        self.base - self.slope * field_of_view
    }
}

impl Default for MagnitudeLimit {
    fn default() -> Self {
        Self {
            base: 6.87,
            slope: 3.0,
        }
    }
}

/// Field-of-view bounds and zoom steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    /// Narrowest field of view
    pub min_field_of_view: f64,
    /// Widest field of view
    pub max_field_of_view: f64,
    /// Multiplier applied when zooming in
    pub zoom_in_factor: f64,
    /// Multiplier applied when zooming out
    pub zoom_out_factor: f64,
    /// Smallest field of view that may still be multiplied by `zoom_in_factor`
    pub zoom_in_floor: f64,
    /// Largest field of view that may still be multiplied by `zoom_out_factor`
    pub zoom_out_ceiling: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_field_of_view: 0.1,
            max_field_of_view: 1.0,
            zoom_in_factor: 0.8,
            zoom_out_factor: 1.25,
            zoom_in_floor: 0.125,
            zoom_out_ceiling: 0.8,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub grid: GridSize,
    pub magnitude_limit: MagnitudeLimit,
    pub zoom: ZoomLimits,
    /// Fraction of the field of view moved by one turn command
    pub turn_step: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            magnitude_limit: MagnitudeLimit::default(),
            zoom: ZoomLimits::default(),
            turn_step: 0.5,
        }
    }
}

impl SkyConfig {
    /// Reject configurations the projection cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}",
                self.grid
            )));
        }
        let zoom = &self.zoom;
        let numbers = [
            ("magnitude_limit.base", self.magnitude_limit.base),
            ("magnitude_limit.slope", self.magnitude_limit.slope),
            ("zoom.min_field_of_view", zoom.min_field_of_view),
            ("zoom.max_field_of_view", zoom.max_field_of_view),
            ("zoom.zoom_in_factor", zoom.zoom_in_factor),
            ("zoom.zoom_out_factor", zoom.zoom_out_factor),
            ("zoom.zoom_in_floor", zoom.zoom_in_floor),
            ("zoom.zoom_out_ceiling", zoom.zoom_out_ceiling),
            ("turn_step", self.turn_step),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }
        if self.turn_step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "turn_step must not be negative, got {}",
                self.turn_step
            )));
        }
        if !(zoom.min_field_of_view > 0.0 && zoom.min_field_of_view <= zoom.max_field_of_view) {
            return Err(ConfigError::Invalid(format!(
                "field of view range [{}, {}] is empty or not positive",
                zoom.min_field_of_view, zoom.max_field_of_view
            )));
        }
        if zoom.zoom_in_factor <= 0.0 || zoom.zoom_out_factor <= 0.0 {
            return Err(ConfigError::Invalid(
                "zoom factors must be positive".to_string(),
            ));
        }
        let range = zoom.min_field_of_view..=zoom.max_field_of_view;
        for (name, value) in [
            ("zoom_in_floor", zoom.zoom_in_floor),
            ("zoom_out_ceiling", zoom.zoom_out_ceiling),
        ] {
            if !range.contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} is outside the field of view range [{}, {}]",
                    zoom.min_field_of_view, zoom.max_field_of_view
                )));
            }
        }
        Ok(())
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file; missing keys take their default values
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
