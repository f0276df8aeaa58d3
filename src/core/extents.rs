use crate::core::DataPoint;

/// Domain bounds of all currently visible points, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainExtents {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DomainExtents {
    /// Fits extents over the union of several point slices.
    ///
    /// Returns `None` when no finite point exists at all.
    #[must_use]
    pub fn fit<'a, I>(series_points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [DataPoint]>,
    {
        let mut extents: Option<Self> = None;
        for points in series_points {
            for point in points {
                if !point.is_finite() {
                    continue;
                }
                extents = Some(match extents {
                    None => Self {
                        x_min: point.x,
                        x_max: point.x,
                        y_min: point.y,
                        y_max: point.y,
                    },
                    Some(current) => Self {
                        x_min: current.x_min.min(point.x),
                        x_max: current.x_max.max(point.x),
                        y_min: current.y_min.min(point.y),
                        y_max: current.y_max.max(point.y),
                    },
                });
            }
        }
        extents
    }

    /// A frame is renderable only with a strictly positive span on both axes.
    ///
    /// Equality means every X (or every Y) value is identical; mapping through
    /// such extents would divide by zero, so callers must check this first.
    #[must_use]
    pub fn is_renderable(self) -> bool {
        self.x_max > self.x_min && self.y_max > self.y_min
    }

    #[must_use]
    pub fn x_range(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn y_range(self) -> f64 {
        self.y_max - self.y_min
    }

    /// Shifts the visible X window without touching the Y axis.
    #[must_use]
    pub fn shifted_x(self, delta: f64) -> Self {
        Self {
            x_min: self.x_min + delta,
            x_max: self.x_max + delta,
            ..self
        }
    }
}
