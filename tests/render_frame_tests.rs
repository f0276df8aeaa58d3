use serde_json::json;
use thermoline::api::{ChartEngine, ChartEngineConfig, MagnifierConfig, Theme};
use thermoline::core::{DomainExtents, LineSeries, PlotMapper, PlotRect, Viewport};
use thermoline::interaction::{TouchEvent, TouchPhase};
use thermoline::render::{Color, NullRenderer, Renderer};

fn series(label: &str, records: Vec<serde_json::Value>) -> LineSeries {
    LineSeries::new(label, Color::rgb(0.9, 0.3, 0.2), "X", "Y")
        .expect("valid series")
        .with_records(records)
}

fn build_engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(400, 300));
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn short_span_records() -> Vec<serde_json::Value> {
    vec![
        json!({ "X": 1_000.0, "Y": 10.0 }),
        json!({ "X": 2_000.0, "Y": 20.0 }),
        json!({ "X": 3_000.0, "Y": 15.0 }),
    ]
}

#[test]
fn empty_engine_renders_no_data_placeholder() {
    let mut engine = build_engine();
    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");

    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "No data to display");
    assert!(frame.lines.is_empty());
    assert!(frame.paths.is_empty());
}

#[test]
fn series_without_resolvable_points_renders_no_data_placeholder() {
    let mut engine = build_engine();
    engine.set_series(vec![series(
        "Temp",
        vec![json!({ "X": "fog", "Y": "mist" })],
    )]);

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "No data to display");
}

#[test]
fn identical_x_values_render_invalid_range_placeholder() {
    let mut engine = build_engine();
    engine.set_series(vec![series(
        "Temp",
        vec![
            json!({ "X": 1_000.0, "Y": 10.0 }),
            json!({ "X": 1_000.0, "Y": 20.0 }),
        ],
    )]);

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "Invalid data range");
    assert!(frame.lines.is_empty());
}

#[test]
fn identical_y_values_render_invalid_range_placeholder() {
    let mut engine = build_engine();
    engine.set_series(vec![series(
        "Temp",
        vec![
            json!({ "X": 1_000.0, "Y": 10.0 }),
            json!({ "X": 2_000.0, "Y": 10.0 }),
        ],
    )]);

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    assert_eq!(frame.texts[0].text, "Invalid data range");
}

#[test]
fn full_frame_composes_grid_axes_labels_and_series() {
    let mut engine = build_engine();
    engine.set_series(vec![series("Temp", short_span_records())]);

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");

    // Six grid lines (5 divisions) plus the two axis base lines.
    assert_eq!(frame.lines.len(), 8);
    assert_eq!(frame.paths.len(), 1);
    assert_eq!(frame.paths[0].points.len(), 3);
    assert!(frame.paths[0].fill.is_some());

    // Short span: six time labels, six value labels, one legend label.
    assert_eq!(frame.texts.len(), 13);
    assert!(frame.texts.iter().all(|t| t.rotation_degrees == 0.0));
    assert!(frame.texts.iter().any(|t| t.text == "Temp"));
    assert!(frame.texts.iter().any(|t| t.text.ends_with("°C")));
}

#[test]
fn day_spanning_window_uses_fewer_rotated_time_labels() {
    let mut engine = build_engine();
    engine.set_series(vec![series(
        "Temp",
        vec![
            json!({ "X": 0.0, "Y": 10.0 }),
            json!({ "X": 172_800.0, "Y": 20.0 }),
        ],
    )]);

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");

    let rotated: Vec<_> = frame
        .texts
        .iter()
        .filter(|t| t.rotation_degrees == 45.0)
        .collect();
    // Coarser cadence: five rotated day+time labels instead of six.
    assert_eq!(rotated.len(), 5);
    // Day format carries a weekday prefix, e.g. "Thu 00:00".
    assert!(rotated.iter().all(|t| t.text.len() > 5));
}

#[test]
fn tooltip_replaces_magnifier_when_lens_is_disabled() {
    let config = ChartEngineConfig::new(Viewport::new(400, 400)).with_magnifier(MagnifierConfig {
        enabled: false,
        ..MagnifierConfig::default()
    });
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series(vec![series(
        "Temp",
        vec![
            json!({ "X": 0.0, "Y": 0.0 }),
            json!({ "X": 10.0, "Y": 10.0 }),
            json!({ "X": 20.0, "Y": 0.0 }),
        ],
    )]);
    engine
        .on_touch(TouchEvent::new(TouchPhase::Pressed, 200.0, 50.0))
        .expect("press");

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");

    assert!(frame.magnifier.is_none());
    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.rects.len(), 1);
    assert!(frame.rects[0].corner_radius > 0.0);
    assert!(frame.texts.iter().any(|t| t.text.starts_with("Temp: 10.0")));
}

#[test]
fn magnifier_overlay_is_centered_on_the_selected_pixel() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 400)),
    )
    .expect("engine init");
    engine.set_series(vec![series(
        "Temp",
        vec![
            json!({ "X": 0.0, "Y": 0.0 }),
            json!({ "X": 10.0, "Y": 10.0 }),
            json!({ "X": 20.0, "Y": 0.0 }),
        ],
    )]);
    engine
        .on_touch(TouchEvent::new(TouchPhase::Pressed, 200.0, 50.0))
        .expect("press");

    let frame = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    let magnifier = frame.magnifier.expect("magnifier");

    assert!((magnifier.source_x - 200.0).abs() <= 1e-9);
    assert!((magnifier.source_y - 50.0).abs() <= 1e-9);
    assert_eq!(magnifier.size_px, 100.0);
    assert_eq!(magnifier.scale, 2.0);
    // No marker circle or tooltip while the lens is up.
    assert!(frame.circles.is_empty());
    assert!(frame.rects.is_empty());
}

#[test]
fn series_stroke_fades_in_with_animation_progress() {
    let mut engine = build_engine();
    engine.set_series(vec![series("Temp", short_span_records())]);

    let first = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    assert_eq!(first.paths[0].color.alpha, 0.0);
    assert!(engine.needs_frame());

    let midway = engine
        .build_render_frame(Theme::Light, 250.0)
        .expect("frame");
    assert!((midway.paths[0].color.alpha - 0.5).abs() <= 1e-9);
    assert!(engine.needs_frame());

    let done = engine
        .build_render_frame(Theme::Light, 500.0)
        .expect("frame");
    assert_eq!(done.paths[0].color.alpha, 1.0);
    assert!(!engine.needs_frame());
}

#[test]
fn data_change_interpolates_from_previous_positions() {
    let mut engine = build_engine();
    engine.set_series(vec![series(
        "Temp",
        vec![
            json!({ "X": 0.0, "Y": 0.0 }),
            json!({ "X": 5.0, "Y": 10.0 }),
            json!({ "X": 10.0, "Y": 20.0 }),
        ],
    )]);
    let _ = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    let settled = engine
        .build_render_frame(Theme::Light, 500.0)
        .expect("frame");
    let old_positions = settled.paths[0].points.clone();

    // Same extents, only the middle point moves.
    engine
        .update_series_records(
            "Temp",
            vec![
                json!({ "X": 0.0, "Y": 0.0 }),
                json!({ "X": 5.0, "Y": 16.0 }),
                json!({ "X": 10.0, "Y": 20.0 }),
            ],
        )
        .expect("update records");

    // At progress zero, rendered positions equal the previous snapshot.
    let rearmed = engine
        .build_render_frame(Theme::Light, 1_000.0)
        .expect("frame");
    assert_eq!(rearmed.paths[0].points, old_positions);
    assert!(engine.needs_frame());

    // Midway, the moved point sits halfway between old and new pixels.
    let midway = engine
        .build_render_frame(Theme::Light, 1_250.0)
        .expect("frame");
    let plot = PlotRect::inset(Viewport::new(400, 300), 50.0).expect("plot");
    let extents = DomainExtents {
        x_min: 0.0,
        x_max: 10.0,
        y_min: 0.0,
        y_max: 20.0,
    };
    let mapper = PlotMapper::new(extents, plot).expect("mapper");
    let (_, old_py) = mapper.to_pixel(5.0, 10.0).expect("old pixel");
    let (_, new_py) = mapper.to_pixel(5.0, 16.0).expect("new pixel");
    let expected_py = (old_py + new_py) / 2.0;
    assert!((midway.paths[0].points[1].1 - expected_py).abs() <= 1e-9);

    // At completion, rendered positions equal the current points exactly.
    let finished = engine
        .build_render_frame(Theme::Light, 1_500.0)
        .expect("frame");
    let (_, final_py) = mapper.to_pixel(5.0, 16.0).expect("final pixel");
    assert!((finished.paths[0].points[1].1 - final_py).abs() <= 1e-9);
    assert!(!engine.needs_frame());
}

#[test]
fn themes_select_distinct_backgrounds() {
    let mut engine = build_engine();
    let light = engine.build_render_frame(Theme::Light, 0.0).expect("frame");
    let dark = engine.build_render_frame(Theme::Dark, 0.0).expect("frame");

    assert_ne!(light.clear_color, dark.clear_color);
}

#[test]
fn render_reports_primitive_counts_through_null_renderer() {
    let mut engine = build_engine();
    engine.set_series(vec![series("Temp", short_span_records())]);
    engine.render(Theme::Light, 0.0).expect("render");

    assert_eq!(engine.renderer().last_line_count, 8);
    assert_eq!(engine.renderer().last_path_count, 1);
    assert_eq!(engine.renderer().last_text_count, 13);
    assert!(!engine.renderer().last_had_magnifier);
}

#[test]
fn pan_shifts_the_rendered_window() {
    let mut engine = build_engine();
    engine.set_series(vec![series("Temp", short_span_records())]);
    let _ = engine.build_render_frame(Theme::Light, 500.0).expect("frame");
    let unshifted = engine
        .build_render_frame(Theme::Light, 500.0)
        .expect("frame");

    engine
        .on_touch(TouchEvent::new(TouchPhase::Pressed, 200.0, 150.0))
        .expect("press");
    engine
        .on_touch(TouchEvent::new(TouchPhase::Moved, 50.0, 150.0))
        .expect("drag left");
    engine
        .on_touch(TouchEvent::new(TouchPhase::Released, 0.0, 0.0))
        .expect("release");

    let shifted = engine
        .build_render_frame(Theme::Light, 500.0)
        .expect("frame");

    // Dragging left pans the window forward: content moves left on screen.
    assert!(shifted.paths[0].points[0].0 < unshifted.paths[0].points[0].0);
}

#[test]
fn every_frame_passes_validation_via_null_renderer() {
    let mut engine = build_engine();
    engine.set_series(vec![series("Temp", short_span_records())]);

    let mut renderer = NullRenderer::default();
    for now_ms in [0.0, 100.0, 250.0, 500.0, 750.0] {
        let frame = engine
            .build_render_frame(Theme::Dark, now_ms)
            .expect("frame");
        renderer.render(&frame).expect("frame validates");
    }
}
