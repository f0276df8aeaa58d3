use std::collections::HashMap;

use chrono::DateTime;

/// Visible spans longer than one day switch the X axis to the coarser
/// day-of-week label format.
pub const DAY_FORMAT_THRESHOLD_SECONDS: f64 = 86_400.0;

#[must_use]
pub fn uses_day_format(visible_span_seconds: f64) -> bool {
    visible_span_seconds.abs() > DAY_FORMAT_THRESHOLD_SECONDS
}

/// Formats a Unix-seconds timestamp as a UTC axis label.
///
/// `%a %H:%M` for day-spanning windows, `%H:%M` otherwise. Timestamps
/// outside chrono's representable range fall back to a placeholder label
/// rather than failing the frame.
#[must_use]
pub fn format_time_label(unix_seconds: f64, day_format: bool) -> String {
    let Some(datetime) = DateTime::from_timestamp(unix_seconds as i64, 0) else {
        return "--:--".to_owned();
    };

    if day_format {
        datetime.format("%a %H:%M").to_string()
    } else {
        datetime.format("%H:%M").to_string()
    }
}

/// Formats an axis/tooltip value to one decimal place with a unit suffix.
#[must_use]
pub fn format_value_label(value: f64, unit_suffix: &str) -> String {
    format!("{value:.1}{unit_suffix}")
}

/// Deterministic, backend-independent text width estimate.
///
/// Real measurement belongs to backends; frame geometry only needs a stable
/// approximation so tooltip boxes look the same under every renderer.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LabelKind {
    Time { day_format: bool },
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LabelKey {
    kind: LabelKind,
    quantized: i64,
}

/// Runtime metrics exposed by the in-engine label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Bounded cache of formatted axis/tooltip labels.
///
/// Tick values repeat across frames while panning and animating; caching
/// keeps per-frame formatting off the hot path.
#[derive(Debug, Default)]
pub(super) struct LabelCache {
    entries: HashMap<LabelKey, String>,
    hits: u64,
    misses: u64,
}

impl LabelCache {
    const MAX_ENTRIES: usize = 1024;

    pub(super) fn time_label(&mut self, unix_seconds: f64, day_format: bool) -> String {
        let key = LabelKey {
            kind: LabelKind::Time { day_format },
            quantized: quantize_seconds(unix_seconds),
        };
        self.get_or_insert(key, || format_time_label(unix_seconds, day_format))
    }

    pub(super) fn value_label(&mut self, value: f64, unit_suffix: &str) -> String {
        let key = LabelKey {
            kind: LabelKind::Value,
            quantized: quantize_tenths(value),
        };
        self.get_or_insert(key, || format_value_label(value, unit_suffix))
    }

    pub(super) fn stats(&self) -> LabelCacheStats {
        LabelCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }

    fn get_or_insert(&mut self, key: LabelKey, format: impl FnOnce() -> String) -> String {
        if let Some(cached) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return cached.clone();
        }

        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.clear();
        }
        let value = format();
        self.entries.insert(key, value.clone());
        value
    }
}

fn quantize_seconds(value: f64) -> i64 {
    // Truncate exactly like the formatter does, so a key never aliases two
    // distinct rendered labels.
    if value.is_finite() { value as i64 } else { 0 }
}

fn quantize_tenths(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = (value * 10.0).round();
    if rounded > i64::MAX as f64 {
        i64::MAX
    } else if rounded < i64::MIN as f64 {
        i64::MIN
    } else {
        rounded as i64
    }
}
