use serde::{Deserialize, Serialize};

use crate::core::{AnimationConfig, Viewport};
use crate::error::{ChartError, ChartResult};

/// Magnifier overlay tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnifierConfig {
    pub enabled: bool,
    /// Side length of the square lens buffer.
    pub size_px: f64,
    pub scale: f64,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size_px: 100.0,
            scale: 2.0,
        }
    }
}

impl MagnifierConfig {
    fn validate(self) -> ChartResult<Self> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "magnifier size must be finite and > 0".to_owned(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "magnifier scale must be finite and > 1".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    /// Uniform inset reserving space for axis labels on all sides.
    #[serde(default = "default_margin_px")]
    pub margin_px: f64,
    /// Number of horizontal grid divisions (and Y-axis tick labels).
    #[serde(default = "default_grid_tick_count")]
    pub grid_tick_count: u32,
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Maximum pixel distance between a touch and the nearest data point
    /// for a selection to be made.
    #[serde(default = "default_hit_test_max_distance_px")]
    pub hit_test_max_distance_px: f64,
    /// Suffix appended to Y-axis and tooltip value labels.
    #[serde(default = "default_unit_suffix")]
    pub unit_suffix: String,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_series_stroke_width")]
    pub series_stroke_width: f64,
    /// When false, touch events are ignored entirely.
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    #[serde(default)]
    pub magnifier: MagnifierConfig,
}

impl ChartEngineConfig {
    /// Creates a config with default interaction and styling parameters.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin_px: default_margin_px(),
            grid_tick_count: default_grid_tick_count(),
            animation: AnimationConfig::default(),
            hit_test_max_distance_px: default_hit_test_max_distance_px(),
            unit_suffix: default_unit_suffix(),
            label_font_size_px: default_label_font_size_px(),
            series_stroke_width: default_series_stroke_width(),
            interactive: default_interactive(),
            magnifier: MagnifierConfig::default(),
        }
    }

    #[must_use]
    pub fn with_margin_px(mut self, margin_px: f64) -> Self {
        self.margin_px = margin_px;
        self
    }

    #[must_use]
    pub fn with_grid_tick_count(mut self, grid_tick_count: u32) -> Self {
        self.grid_tick_count = grid_tick_count;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_hit_test_max_distance_px(mut self, distance_px: f64) -> Self {
        self.hit_test_max_distance_px = distance_px;
        self
    }

    #[must_use]
    pub fn with_unit_suffix(mut self, unit_suffix: impl Into<String>) -> Self {
        self.unit_suffix = unit_suffix.into();
        self
    }

    #[must_use]
    pub fn with_label_font_size_px(mut self, font_size_px: f64) -> Self {
        self.label_font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_series_stroke_width(mut self, stroke_width: f64) -> Self {
        self.series_stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn with_magnifier(mut self, magnifier: MagnifierConfig) -> Self {
        self.magnifier = magnifier;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.margin_px.is_finite() || self.margin_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "margin must be finite and >= 0".to_owned(),
            ));
        }
        if self.grid_tick_count == 0 {
            return Err(ChartError::InvalidConfig(
                "grid tick count must be >= 1".to_owned(),
            ));
        }
        if !self.hit_test_max_distance_px.is_finite() || self.hit_test_max_distance_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "hit-test distance must be finite and > 0".to_owned(),
            ));
        }
        if !self.label_font_size_px.is_finite() || self.label_font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.series_stroke_width.is_finite() || self.series_stroke_width <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "series stroke width must be finite and > 0".to_owned(),
            ));
        }
        let animation = self.animation.validate()?;
        let magnifier = self.magnifier.validate()?;
        Ok(Self {
            animation,
            magnifier,
            ..self
        })
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_margin_px() -> f64 {
    50.0
}

fn default_grid_tick_count() -> u32 {
    5
}

fn default_hit_test_max_distance_px() -> f64 {
    48.0
}

fn default_unit_suffix() -> String {
    "°C".to_owned()
}

fn default_label_font_size_px() -> f64 {
    20.0
}

fn default_series_stroke_width() -> f64 {
    4.0
}

fn default_interactive() -> bool {
    true
}
