mod engine;
mod engine_config;
mod frame_builder;
mod label_format;
mod theme;

pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, MagnifierConfig};
pub use label_format::{
    DAY_FORMAT_THRESHOLD_SECONDS, LabelCacheStats, estimate_text_width_px, format_time_label,
    format_value_label, uses_day_format,
};
pub use theme::{Palette, Theme};
