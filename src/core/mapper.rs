use crate::core::{DomainExtents, PlotRect};
use crate::error::{ChartError, ChartResult};

/// Affine domain<->pixel transform over a margin-inset plot rectangle.
///
/// X maps left-to-right; Y is inverted so larger domain values render higher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMapper {
    extents: DomainExtents,
    plot: PlotRect,
}

impl PlotMapper {
    /// Builds a mapper from renderable extents.
    ///
    /// Degenerate extents (zero span on either axis) are rejected; callers
    /// render a placeholder instead of mapping through them.
    pub fn new(extents: DomainExtents, plot: PlotRect) -> ChartResult<Self> {
        if !extents.is_renderable() {
            return Err(ChartError::InvalidData(
                "extents must have a positive span on both axes".to_owned(),
            ));
        }

        Ok(Self { extents, plot })
    }

    #[must_use]
    pub fn extents(self) -> DomainExtents {
        self.extents
    }

    #[must_use]
    pub fn plot_rect(self) -> PlotRect {
        self.plot
    }

    pub fn to_pixel(self, x: f64, y: f64) -> ChartResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "domain coordinates must be finite".to_owned(),
            ));
        }

        let px = self.plot.left + (x - self.extents.x_min) / self.extents.x_range() * self.plot.width;
        let py = self.plot.top + self.plot.height
            - (y - self.extents.y_min) / self.extents.y_range() * self.plot.height;
        Ok((px, py))
    }

    pub fn to_domain(self, px: f64, py: f64) -> ChartResult<(f64, f64)> {
        if !px.is_finite() || !py.is_finite() {
            return Err(ChartError::InvalidData(
                "pixel coordinates must be finite".to_owned(),
            ));
        }

        let x = self.extents.x_min + (px - self.plot.left) / self.plot.width * self.extents.x_range();
        let y = self.extents.y_max - (py - self.plot.top) / self.plot.height * self.extents.y_range();
        Ok((x, y))
    }
}
