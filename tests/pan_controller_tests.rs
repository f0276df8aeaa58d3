use serde_json::json;
use thermoline::core::{DomainExtents, LineSeries, PlotRect, Viewport};
use thermoline::interaction::PanController;
use thermoline::render::Color;

fn extents() -> DomainExtents {
    DomainExtents {
        x_min: 1_000.0,
        x_max: 3_000.0,
        y_min: 10.0,
        y_max: 20.0,
    }
}

#[test]
fn half_plot_width_offset_shifts_half_the_domain_range() {
    let plot = PlotRect::inset(Viewport::new(400, 300), 50.0).expect("plot");
    let mut pan = PanController::default();
    pan.accumulate(plot.width / 2.0);

    let shifted = pan.apply(extents(), plot);
    assert!((shifted.x_min - 2_000.0).abs() <= 1e-9);
    assert!((shifted.x_max - 4_000.0).abs() <= 1e-9);
    assert_eq!(shifted.y_min, 10.0);
    assert_eq!(shifted.y_max, 20.0);
}

#[test]
fn offset_accumulates_across_events() {
    let plot = PlotRect::inset(Viewport::new(400, 300), 50.0).expect("plot");
    let mut pan = PanController::default();
    pan.accumulate(100.0);
    pan.accumulate(-25.0);
    pan.accumulate(75.0);

    assert!((pan.offset_px() - 150.0).abs() <= 1e-12);

    let shifted = pan.apply(extents(), plot);
    assert!((shifted.x_min - 2_000.0).abs() <= 1e-9);
}

#[test]
fn non_finite_deltas_are_ignored() {
    let mut pan = PanController::default();
    pan.accumulate(50.0);
    pan.accumulate(f64::NAN);
    pan.accumulate(f64::INFINITY);

    assert!((pan.offset_px() - 50.0).abs() <= 1e-12);
}

#[test]
fn reset_restores_the_unshifted_window() {
    let plot = PlotRect::inset(Viewport::new(400, 300), 50.0).expect("plot");
    let mut pan = PanController::default();
    pan.accumulate(123.0);
    pan.reset();

    assert_eq!(pan.offset_px(), 0.0);
    assert_eq!(pan.apply(extents(), plot), extents());
}

#[test]
fn panning_never_mutates_stored_series_data() {
    let records = vec![
        json!({ "Dt": 1_000, "Temp": { "Day": 10.0 } }),
        json!({ "Dt": 3_000, "Temp": { "Day": 20.0 } }),
    ];
    let series = LineSeries::new("Temp", Color::rgb(0.9, 0.3, 0.2), "Dt", "Temp.Day")
        .expect("valid series")
        .with_records(records);
    let before = series.extract_points();

    let plot = PlotRect::inset(Viewport::new(400, 300), 50.0).expect("plot");
    let mut pan = PanController::default();
    pan.accumulate(999.0);
    let _ = pan.apply(extents(), plot);

    assert_eq!(series.extract_points(), before);
}
