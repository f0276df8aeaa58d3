
pub use hit_test::{Hit, find_nearest};

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, DomainExtents, PlotRect};

/// Phase of one pointer gesture, in the surface's own pixel space.
///
/// Phases arrive strictly sequentially per gesture: a `Moved` always follows
/// a `Pressed`, and a `Released` terminates the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Pressed,
    Moved,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f64,
    pub y: f64,
}

impl TouchEvent {
    #[must_use]
    pub fn new(phase: TouchPhase, x: f64, y: f64) -> Self {
        Self { phase, x, y }
    }
}

/// Currently selected data point, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub series_label: String,
    pub point: DataPoint,
}

/// Accumulates horizontal drag distance and converts it into a domain-space
/// shift of the visible X window.
///
/// The offset is cumulative across gestures: releasing a drag keeps the
/// panned window where it is. Hosts wanting per-gesture panning call
/// `reset` on release.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanController {
    offset_px: f64,
}

impl PanController {
    pub fn accumulate(&mut self, delta_px: f64) {
        if delta_px.is_finite() {
            self.offset_px += delta_px;
        }
    }

    #[must_use]
    pub fn offset_px(self) -> f64 {
        self.offset_px
    }

    pub fn reset(&mut self) {
        self.offset_px = 0.0;
    }

    /// Shifts the visible X window by the accumulated offset.
    ///
    /// Only the window moves; stored series data is never mutated.
    #[must_use]
    pub fn apply(self, extents: DomainExtents, plot: PlotRect) -> DomainExtents {
        let shift = self.offset_px / plot.width * extents.x_range();
        extents.shifted_x(shift)
    }
}

/// Transient per-gesture state owned by the interaction layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    selection: Option<Selection>,
    magnifying: bool,
    pan: PanController,
    last_touch_x: f64,
}

impl InteractionState {
    pub fn on_pressed(&mut self, x: f64) {
        self.last_touch_x = x;
        self.magnifying = true;
    }

    /// Folds a drag movement into the pan offset and returns the pixel delta.
    ///
    /// The offset moves opposite to the finger so chart content follows it.
    pub fn on_moved(&mut self, x: f64) -> f64 {
        let delta = x - self.last_touch_x;
        self.pan.accumulate(-delta);
        self.last_touch_x = x;
        self.magnifying = true;
        delta
    }

    /// Ends the gesture: selection and magnifier clear, pan offset stays.
    pub fn on_released(&mut self) {
        self.magnifying = false;
        self.selection = None;
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn is_magnifying(&self) -> bool {
        self.magnifying
    }

    #[must_use]
    pub fn pan(&self) -> PanController {
        self.pan
    }

    pub fn reset_pan(&mut self) {
        self.pan.reset();
    }
}
