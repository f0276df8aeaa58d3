use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_path_count: usize,
    pub last_circle_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub last_had_magnifier: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines.len();
        self.last_path_count = frame.paths.len();
        self.last_circle_count = frame.circles.len();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        self.last_had_magnifier = frame.magnifier.is_some();
        Ok(())
    }
}
