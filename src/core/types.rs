use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel region inside the surface margins where data is drawn.
///
/// The margin reserves space for axis labels on all four sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    /// Insets a viewport by a uniform margin.
    pub fn inset(viewport: Viewport, margin_px: f64) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !margin_px.is_finite() || margin_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "plot margin must be finite and >= 0".to_owned(),
            ));
        }

        let width = f64::from(viewport.width) - 2.0 * margin_px;
        let height = f64::from(viewport.height) - 2.0 * margin_px;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "plot margin {margin_px} leaves no plot area in a {}x{} viewport",
                viewport.width, viewport.height
            )));
        }

        Ok(Self {
            left: margin_px,
            top: margin_px,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains(self, px: f64, py: f64) -> bool {
        px >= self.left && px <= self.right() && py >= self.top && py <= self.bottom()
    }
}
