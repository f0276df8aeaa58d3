use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, MagnifierPrimitive, PathPrimitive, RectPrimitive,
    TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Backends draw the primitive lists in a fixed z-order: clear to
/// `clear_color`, then lines (grid and axes), paths (series), circles
/// (selection markers), rects (tooltip boxes), texts, and finally the
/// magnifier overlay. Within each list, insertion order is draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub clear_color: Color,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub magnifier: Option<MagnifierPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, clear_color: Color) -> Self {
        Self {
            viewport,
            clear_color,
            lines: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            magnifier: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_magnifier(mut self, magnifier: MagnifierPrimitive) -> Self {
        self.magnifier = Some(magnifier);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.clear_color.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        if let Some(magnifier) = self.magnifier {
            magnifier.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.paths.is_empty()
            && self.circles.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.magnifier.is_none()
    }
}
