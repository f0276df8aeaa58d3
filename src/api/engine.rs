use serde_json::Value;
use tracing::trace;

use crate::core::{
    AnimationController, DomainExtents, LineSeries, PlotMapper, PlotRect, SeriesStore, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionState, Selection, TouchEvent, TouchPhase, find_nearest};
use crate::render::Renderer;

use super::engine_config::ChartEngineConfig;
use super::label_format::{LabelCache, LabelCacheStats};
use super::theme::Theme;

/// Chart engine orchestrating series data, interaction, animation, and frame
/// materialization over a pluggable renderer backend.
///
/// The engine is single-threaded and clock-free: hosts pass a monotonic
/// `now_ms` into rendering calls and consult [`ChartEngine::needs_frame`] to
/// decide whether to schedule another one. It never schedules callbacks
/// itself.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) store: SeriesStore,
    pub(super) animation: AnimationController,
    pub(super) interaction: InteractionState,
    pub(super) label_cache: LabelCache,
    selection_generation: u64,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            animation: AnimationController::new(config.animation),
            config,
            store: SeriesStore::default(),
            interaction: InteractionState::default(),
            label_cache: LabelCache::default(),
            selection_generation: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Replaces the whole series set.
    pub fn set_series(&mut self, series: Vec<LineSeries>) {
        self.store.replace_all(series);
        self.drop_stale_selection();
    }

    /// Inserts a series, replacing any existing series with the same label.
    pub fn upsert_series(&mut self, series: LineSeries) {
        self.store.upsert(series);
    }

    /// Swaps the source records of an existing series.
    ///
    /// The next frame re-arms that series' animation cycle; any in-flight
    /// interpolation is superseded, not cancelled.
    pub fn update_series_records(&mut self, label: &str, records: Vec<Value>) -> ChartResult<()> {
        self.store.set_records(label, records)
    }

    pub fn remove_series(&mut self, label: &str) -> bool {
        let removed = self.store.remove(label);
        if removed {
            self.drop_stale_selection();
        }
        removed
    }

    pub fn clear_series(&mut self) {
        self.store.clear();
        self.drop_stale_selection();
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.store.len()
    }

    /// Monotonic counter incremented on every series mutation.
    ///
    /// Hosts observe this instead of per-field change callbacks.
    #[must_use]
    pub fn series_generation(&self) -> u64 {
        self.store.generation()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.interaction.selection()
    }

    /// Monotonic counter incremented whenever the selection changes.
    #[must_use]
    pub fn selection_generation(&self) -> u64 {
        self.selection_generation
    }

    #[must_use]
    pub fn is_magnifying(&self) -> bool {
        self.interaction.is_magnifying()
    }

    #[must_use]
    pub fn pan_offset_px(&self) -> f64 {
        self.interaction.pan().offset_px()
    }

    /// Clears the accumulated pan offset, restoring the unshifted window.
    pub fn reset_pan(&mut self) {
        self.interaction.reset_pan();
    }

    #[must_use]
    pub fn label_cache_stats(&self) -> LabelCacheStats {
        self.label_cache.stats()
    }

    /// Applies a new surface size.
    ///
    /// No pixel-space state is cached across frames (animation snapshots
    /// live in domain space), so a resize only swaps the viewport.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        Ok(())
    }

    /// True while any series animation cycle is unfinished.
    ///
    /// The host's scheduler polls this after each render to decide whether
    /// to request another frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.animation.is_animating()
    }

    /// Feeds one pointer event into the interaction layer.
    ///
    /// Pressed selects the nearest point and raises the magnifier; Moved
    /// accumulates pan and re-selects; Released clears the selection and
    /// magnifier while keeping the pan offset. Hosts repaint after every
    /// handled event.
    pub fn on_touch(&mut self, event: TouchEvent) -> ChartResult<()> {
        if !self.config.interactive {
            return Ok(());
        }

        match event.phase {
            TouchPhase::Pressed => {
                validate_touch(event)?;
                self.interaction.on_pressed(event.x);
                let selection = self.hit_test(event.x, event.y);
                self.apply_selection(selection);
            }
            TouchPhase::Moved => {
                validate_touch(event)?;
                let delta = self.interaction.on_moved(event.x);
                trace!(delta, offset = self.interaction.pan().offset_px(), "pan drag");
                let selection = self.hit_test(event.x, event.y);
                self.apply_selection(selection);
            }
            TouchPhase::Released => {
                let changed = self.interaction.selection().is_some();
                self.interaction.on_released();
                if changed {
                    self.selection_generation = self.selection_generation.wrapping_add(1);
                }
            }
        }
        Ok(())
    }

    /// Finds the data point nearest to a pixel location, if any is within
    /// the configured distance.
    ///
    /// Candidates are projected through the same pan-shifted mapping the
    /// renderer draws with, so the hit target is what is on screen.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Selection> {
        let snapshots = self.store.snapshot();
        let extents = DomainExtents::fit(snapshots.iter().map(|s| s.points.as_slice()))?;
        if !extents.is_renderable() {
            return None;
        }
        let plot = PlotRect::inset(self.config.viewport, self.config.margin_px).ok()?;
        let shifted = self.interaction.pan().apply(extents, plot);
        let mapper = PlotMapper::new(shifted, plot).ok()?;

        find_nearest(
            x,
            y,
            &snapshots,
            mapper,
            self.config.hit_test_max_distance_px,
        )
        .map(|hit| Selection {
            series_label: hit.series_label.to_owned(),
            point: hit.point,
        })
    }

    /// Builds and draws one frame through the renderer backend.
    pub fn render(&mut self, theme: Theme, now_ms: f64) -> ChartResult<()> {
        let frame = self.build_render_frame(theme, now_ms)?;
        self.renderer.render(&frame)
    }

    fn apply_selection(&mut self, selection: Option<Selection>) {
        if self.interaction.selection() != selection.as_ref() {
            self.selection_generation = self.selection_generation.wrapping_add(1);
        }
        self.interaction.set_selection(selection);
    }

    fn drop_stale_selection(&mut self) {
        let stale = self
            .interaction
            .selection()
            .is_some_and(|selection| self.store.get(&selection.series_label).is_none());
        if stale {
            self.interaction.set_selection(None);
            self.selection_generation = self.selection_generation.wrapping_add(1);
        }
    }
}

fn validate_touch(event: TouchEvent) -> ChartResult<()> {
    if !event.x.is_finite() || !event.y.is_finite() {
        return Err(ChartError::InvalidData(
            "touch coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
