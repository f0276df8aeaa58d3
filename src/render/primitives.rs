use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Same color with a replaced alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Vertical gradient fill between a path and a horizontal baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineGradientFill {
    pub baseline_y: f64,
    pub top_color: Color,
    pub bottom_color: Color,
}

/// Draw command for one connected polyline in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
    pub fill: Option<BaselineGradientFill>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
            fill: None,
        }
    }

    #[must_use]
    pub fn with_baseline_fill(mut self, fill: BaselineGradientFill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.is_empty() {
            return Err(ChartError::InvalidData(
                "path must contain at least one point".to_owned(),
            ));
        }
        for (x, y) in &self.points {
            if !x.is_finite() || !y.is_finite() {
                return Err(ChartError::InvalidData(
                    "path coordinates must be finite".to_owned(),
                ));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "path stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()?;
        if let Some(fill) = self.fill {
            if !fill.baseline_y.is_finite() {
                return Err(ChartError::InvalidData(
                    "fill baseline must be finite".to_owned(),
                ));
            }
            fill.top_color.validate()?;
            fill.bottom_color.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one filled circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one filled (optionally rounded) rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and > 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Clockwise rotation around the anchor point.
    pub rotation_degrees: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_degrees: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_degrees: f64) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(ChartError::InvalidData(
                "text rotation must be finite".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for the circular magnifier overlay.
///
/// Backends re-render the data layers around `(source_x, source_y)` into an
/// offscreen square buffer at `scale`, overlay cross-hair marks, and
/// composite the buffer at `(anchor_x, anchor_y)` behind a radial-gradient
/// circular mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnifierPrimitive {
    /// Pixel position being magnified (the selected point).
    pub source_x: f64,
    pub source_y: f64,
    /// Top-left corner where the lens buffer is composited.
    pub anchor_x: f64,
    pub anchor_y: f64,
    /// Side length of the square lens buffer.
    pub size_px: f64,
    pub scale: f64,
    pub mask_inner: Color,
    pub mask_outer: Color,
    pub crosshair_color: Color,
}

impl MagnifierPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        for value in [self.source_x, self.source_y, self.anchor_x, self.anchor_y] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "magnifier coordinates must be finite".to_owned(),
                ));
            }
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "magnifier size must be finite and > 0".to_owned(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 1.0 {
            return Err(ChartError::InvalidData(
                "magnifier scale must be finite and > 1".to_owned(),
            ));
        }
        self.mask_inner.validate()?;
        self.mask_outer.validate()?;
        self.crosshair_color.validate()
    }
}
