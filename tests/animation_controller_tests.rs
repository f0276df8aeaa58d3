use thermoline::core::{AnimationConfig, AnimationController, DataPoint, lerp};

fn points_a() -> Vec<DataPoint> {
    vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 10.0)]
}

fn points_b() -> Vec<DataPoint> {
    vec![DataPoint::new(0.0, 5.0), DataPoint::new(10.0, 20.0)]
}

fn controller() -> AnimationController {
    AnimationController::new(AnimationConfig::default())
}

#[test]
fn first_sight_starts_a_cycle_with_no_previous_points() {
    let mut animation = controller();
    animation.observe("Temp", &points_a(), 0.0);

    assert!(animation.previous_points("Temp").is_empty());
    assert!((animation.progress_at("Temp", 0.0) - 0.0).abs() <= 1e-12);
    assert!(animation.is_animating());
}

#[test]
fn progress_is_monotonic_and_clamped() {
    let mut animation = controller();
    animation.observe("Temp", &points_a(), 0.0);

    let mut last = 0.0;
    for now_ms in [0.0, 100.0, 250.0, 200.0, 400.0, 499.0, 500.0, 10_000.0] {
        let progress = animation.progress_at("Temp", now_ms);
        assert!(progress >= last, "progress regressed at t={now_ms}");
        assert!(progress <= 1.0);
        last = progress;
    }
    assert!((last - 1.0).abs() <= 1e-12);
    assert!(!animation.is_animating());
}

#[test]
fn completion_promotes_latest_points() {
    let mut animation = controller();
    animation.observe("Temp", &points_a(), 0.0);
    let _ = animation.progress_at("Temp", 500.0);

    assert_eq!(animation.previous_points("Temp"), points_a().as_slice());
}

#[test]
fn content_change_rearms_with_previous_snapshot() {
    let mut animation = controller();
    animation.observe("Temp", &points_a(), 0.0);
    let _ = animation.progress_at("Temp", 500.0);

    animation.observe("Temp", &points_b(), 1_000.0);
    assert_eq!(animation.previous_points("Temp"), points_a().as_slice());
    assert!((animation.progress_at("Temp", 1_000.0) - 0.0).abs() <= 1e-12);
    assert!((animation.progress_at("Temp", 1_250.0) - 0.5).abs() <= 1e-12);
    assert!(animation.is_animating());

    let _ = animation.progress_at("Temp", 1_500.0);
    assert_eq!(animation.previous_points("Temp"), points_b().as_slice());
    assert!(!animation.is_animating());
}

#[test]
fn unchanged_content_does_not_rearm() {
    let mut animation = controller();
    animation.observe("Temp", &points_a(), 0.0);
    let _ = animation.progress_at("Temp", 500.0);

    animation.observe("Temp", &points_a(), 1_000.0);
    assert!(!animation.is_animating());
    assert!((animation.progress_at("Temp", 1_000.0) - 1.0).abs() <= 1e-12);
}

#[test]
fn unknown_labels_report_idle() {
    let mut animation = controller();
    assert!((animation.progress_at("Nope", 123.0) - 1.0).abs() <= 1e-12);
    assert!(animation.previous_points("Nope").is_empty());
    assert!(!animation.is_animating());
}

#[test]
fn retained_labels_drop_stale_series() {
    let mut animation = controller();
    animation.observe("Temp", &points_a(), 0.0);
    animation.observe("Humidity", &points_b(), 0.0);

    animation.retain_labels(&["Humidity"]);
    assert!(animation.previous_points("Temp").is_empty());
    assert!((animation.progress_at("Temp", 0.0) - 1.0).abs() <= 1e-12);
    assert!(animation.is_animating());
}

#[test]
fn duration_is_a_configuration_parameter() {
    let mut animation = AnimationController::new(AnimationConfig { duration_ms: 100.0 });
    animation.observe("Temp", &points_a(), 0.0);

    assert!((animation.progress_at("Temp", 50.0) - 0.5).abs() <= 1e-12);
    assert!((animation.progress_at("Temp", 100.0) - 1.0).abs() <= 1e-12);
}

#[test]
fn invalid_durations_are_rejected() {
    assert!(AnimationConfig { duration_ms: 0.0 }.validate().is_err());
    assert!(AnimationConfig { duration_ms: -1.0 }.validate().is_err());
    assert!(
        AnimationConfig {
            duration_ms: f64::NAN
        }
        .validate()
        .is_err()
    );
}

#[test]
fn lerp_hits_both_endpoints_exactly() {
    assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
    assert!((lerp(2.0, 10.0, 0.5) - 6.0).abs() <= 1e-12);
}
