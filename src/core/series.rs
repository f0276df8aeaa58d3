use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{DataPoint, ValuePath};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One named line series over opaque source records.
///
/// Records are resolved only through the X/Y value paths; the series never
/// inspects them otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    label: String,
    color: Color,
    x_path: ValuePath,
    y_path: ValuePath,
    records: Vec<Value>,
}

impl LineSeries {
    pub fn new(
        label: impl Into<String>,
        color: Color,
        x_path: &str,
        y_path: &str,
    ) -> ChartResult<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(ChartError::InvalidConfig(
                "series label must not be empty".to_owned(),
            ));
        }
        color.validate()?;

        Ok(Self {
            label,
            color,
            x_path: ValuePath::parse(x_path)?,
            y_path: ValuePath::parse(y_path)?,
            records: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_records(mut self, records: Vec<Value>) -> Self {
        self.records = records;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Extracts (x, y) pairs from the source records in source order.
    ///
    /// A record whose X or Y path does not resolve is dropped; the rest of
    /// the series is unaffected.
    #[must_use]
    pub fn extract_points(&self) -> Vec<DataPoint> {
        let mut points = Vec::with_capacity(self.records.len());
        let mut dropped = 0_usize;
        for record in &self.records {
            match (self.x_path.resolve(record), self.y_path.resolve(record)) {
                (Some(x), Some(y)) => points.push(DataPoint::new(x, y)),
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                series = %self.label,
                dropped,
                extracted = points.len(),
                "dropped records with unresolvable values"
            );
        }
        trace!(series = %self.label, count = points.len(), "extracted points");
        points
    }
}

/// Per-frame read of one series: everything the renderer needs, detached
/// from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    pub label: String,
    pub color: Color,
    pub points: Vec<DataPoint>,
}

/// Ordered collection of series keyed by label.
///
/// Insertion order is the iteration order used for drawing and hit-test
/// tie-breaking. Every mutation bumps a generation counter, which is the
/// explicit "series changed" signal hosts and the engine observe instead of
/// per-field property callbacks.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: IndexMap<String, LineSeries>,
    generation: u64,
}

impl SeriesStore {
    /// Replaces the whole series set.
    pub fn replace_all(&mut self, series: Vec<LineSeries>) {
        debug!(count = series.len(), "replace series set");
        self.series = series
            .into_iter()
            .map(|series| (series.label.clone(), series))
            .collect();
        self.touch();
    }

    /// Inserts a series, replacing any existing series with the same label.
    pub fn upsert(&mut self, series: LineSeries) {
        debug!(series = %series.label, records = series.record_count(), "upsert series");
        self.series.insert(series.label.clone(), series);
        self.touch();
    }

    /// Swaps the source records of an existing series.
    pub fn set_records(&mut self, label: &str, records: Vec<Value>) -> ChartResult<()> {
        let series = self.series.get_mut(label).ok_or_else(|| {
            ChartError::InvalidData(format!("unknown series label `{label}`"))
        })?;
        trace!(series = %label, count = records.len(), "set series records");
        series.records = records;
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, label: &str) -> bool {
        let removed = self.series.shift_remove(label).is_some();
        if removed {
            debug!(series = %label, "remove series");
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.series.is_empty() {
            debug!("clear series set");
            self.series.clear();
            self.touch();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&LineSeries> {
        self.series.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Monotonic counter incremented on every mutation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Extracts all series for one frame in a single exclusive read scope.
    ///
    /// This is the only place records are read for rendering; a host sharing
    /// the engine across threads holds its lock across this call only, so a
    /// frame never observes a collection mutated mid-iteration.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SeriesSnapshot> {
        self.series
            .values()
            .map(|series| SeriesSnapshot {
                label: series.label.clone(),
                color: series.color,
                points: series.extract_points(),
            })
            .collect()
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
