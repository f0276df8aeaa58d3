use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Theme selected by the host for one render call.
///
/// The engine holds no ambient theme state; hosts pass the current theme
/// into every `render`/`build_render_frame` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

/// Fixed palette of the roles the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub axis_label: Color,
    pub series_label: Color,
    pub marker: Color,
    pub tooltip_fill: Color,
    pub tooltip_text: Color,
    pub magnifier_inner: Color,
    pub magnifier_outer: Color,
}

impl Palette {
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::rgb(1.0, 1.0, 1.0),
                grid: Color::rgba(0.827, 0.827, 0.827, 0.392),
                axis_label: Color::rgb(0.502, 0.502, 0.502),
                series_label: Color::rgb(1.0, 0.0, 0.0),
                marker: Color::rgb(1.0, 0.0, 0.0),
                tooltip_fill: Color::rgba(0.0, 0.0, 0.0, 0.863),
                tooltip_text: Color::rgb(1.0, 1.0, 1.0),
                magnifier_inner: Color::rgb(1.0, 1.0, 1.0),
                magnifier_outer: Color::rgb(0.961, 0.961, 0.961),
            },
            Theme::Dark => Self {
                background: Color::rgb(0.663, 0.663, 0.663),
                grid: Color::rgba(0.502, 0.502, 0.502, 0.392),
                axis_label: Color::rgb(0.961, 0.961, 0.961),
                series_label: Color::rgb(0.961, 0.961, 0.961),
                marker: Color::rgb(0.863, 0.078, 0.235),
                tooltip_fill: Color::rgba(1.0, 1.0, 1.0, 0.863),
                tooltip_text: Color::rgb(0.0, 0.0, 0.0),
                magnifier_inner: Color::rgb(0.663, 0.663, 0.663),
                magnifier_outer: Color::rgb(0.502, 0.502, 0.502),
            },
        }
    }
}
