use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Tuning for data-change transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Interpolation duration in milliseconds.
    pub duration_ms: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration_ms: 500.0 }
    }
}

impl AnimationConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "animation duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Per-series transition state.
///
/// `previous_points` stay in domain space so they survive viewport resizes;
/// they are mapped to pixels through the current extents each frame.
#[derive(Debug, Clone, PartialEq)]
struct SeriesAnimation {
    previous_points: Vec<DataPoint>,
    latest_points: Vec<DataPoint>,
    start_ms: f64,
    progress: f64,
}

/// Drives index-aligned interpolation between the last rendered point set
/// and the current one.
///
/// Two states per series: idle (`progress >= 1`) and animating. A series
/// enters the animating state when first seen or when its extracted points
/// differ by content from the cached snapshot; the cycle is re-armed, not
/// queued. The controller never reads a clock — callers pass `now_ms`.
#[derive(Debug)]
pub struct AnimationController {
    config: AnimationConfig,
    states: IndexMap<String, SeriesAnimation>,
}

impl AnimationController {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            states: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    pub fn set_config(&mut self, config: AnimationConfig) -> ChartResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    /// Registers the extracted point set for a series, arming a new cycle on
    /// first sight or content change.
    pub fn observe(&mut self, label: &str, points: &[DataPoint], now_ms: f64) {
        match self.states.get_mut(label) {
            None => {
                trace!(series = %label, count = points.len(), "first sight, arming animation");
                self.states.insert(
                    label.to_owned(),
                    SeriesAnimation {
                        previous_points: Vec::new(),
                        latest_points: points.to_vec(),
                        start_ms: now_ms,
                        progress: 0.0,
                    },
                );
            }
            Some(state) => {
                if state.latest_points != points {
                    trace!(series = %label, count = points.len(), "data changed, re-arming animation");
                    state.previous_points = std::mem::replace(&mut state.latest_points, points.to_vec());
                    state.start_ms = now_ms;
                    state.progress = 0.0;
                }
            }
        }
    }

    /// Drops state for series no longer present.
    pub fn retain_labels(&mut self, live: &[&str]) {
        self.states.retain(|label, _| live.contains(&label.as_str()));
    }

    /// Advances and returns the interpolation factor for a series.
    ///
    /// Progress is non-decreasing within one cycle and clamped to 1.0; when
    /// a cycle completes, the latest points are promoted to become the
    /// previous snapshot for the next change.
    pub fn progress_at(&mut self, label: &str, now_ms: f64) -> f64 {
        let duration_ms = self.config.duration_ms;
        let Some(state) = self.states.get_mut(label) else {
            return 1.0;
        };
        if state.progress >= 1.0 {
            return 1.0;
        }

        let elapsed = now_ms - state.start_ms;
        let progress = (elapsed / duration_ms).clamp(0.0, 1.0).max(state.progress);
        state.progress = progress;
        if progress >= 1.0 {
            state.previous_points = state.latest_points.clone();
        }
        progress
    }

    /// Point set as of the previous completed cycle, in domain space.
    ///
    /// Empty until a series has finished its first cycle.
    #[must_use]
    pub fn previous_points(&self, label: &str) -> &[DataPoint] {
        self.states
            .get(label)
            .map_or(&[], |state| state.previous_points.as_slice())
    }

    /// True while any series still has an unfinished cycle.
    ///
    /// The embedding scheduler uses this to decide whether to request
    /// another frame; the controller never schedules callbacks itself.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.states.values().any(|state| state.progress < 1.0)
    }
}
