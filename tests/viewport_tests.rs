mod common;

use common::config_with;
use gpui_price_chart::data_types::AxisRange;
use gpui_price_chart::view_controller::ViewController;
use gpui_price_chart::{ChartContainer, ChartOptions, ChartSession};

#[test]
fn test_axis_range_zoom_edge() {
    let mut range = AxisRange::new(100.0, 200.0);
    // Zoom out at the left edge keeps the left edge fixed.
    range.zoom_at(100.0, 0.0, 2.0);
    assert_eq!(range.min, 100.0);
    assert_eq!(range.max, 300.0);
}

#[test]
fn test_axis_range_clamp_keeps_span() {
    let mut range = AxisRange::new(100.0, 200.0);
    range.min_limit = Some(50.0);
    range.max_limit = Some(250.0);

    range.pan(-60.0);
    range.clamp();
    assert_eq!((range.min, range.max), (50.0, 150.0));

    range.pan(150.0);
    range.clamp();
    assert_eq!((range.min, range.max), (150.0, 250.0));
}

#[test]
fn test_pan_axis_y_moves_with_pointer() {
    let mut range = AxisRange::new(0.0, 100.0);
    ViewController::pan_axis(&mut range, 10.0, 100.0, true);
    assert_eq!((range.min, range.max), (10.0, 110.0));
}

#[test]
fn test_zoom_on_flat_range_is_ignored() {
    let mut range = AxisRange::new(5.0, 5.0);
    ViewController::zoom_axis_at(&mut range, 0.5, 0.5);
    assert_eq!((range.min, range.max), (5.0, 5.0));
}

#[test]
fn test_auto_fit_without_data_uses_default() {
    assert_eq!(
        ViewController::compute_auto_fit(f64::NAN, f64::NAN, 0.1),
        (0.0, 100.0)
    );
}

#[test]
fn test_scene_pan_and_zoom_follow_scroll() {
    let container = ChartContainer::new(600.0);
    let mut chart = ChartSession::new(container.clone(), ChartOptions::default());
    chart.configure(config_with(&["ma"])).unwrap();

    let scene = container.scene().unwrap();
    let fitted = scene.read().time_range.clone().unwrap();
    // Five one-minute bars plus half a bar of padding on each side.
    assert_eq!(fitted.span(), 300.0);

    scene.write().pan_pixels(60.0);
    let panned = scene.read().time_range.clone().unwrap();
    assert_eq!(panned.min, fitted.min - 30.0);

    scene.write().zoom_at(0.5, 0.5);
    let zoomed = scene.read().time_range.clone().unwrap();
    assert_eq!(zoomed.span(), 150.0);

    scene.write().fit_content();
    assert_eq!(scene.read().time_range, Some(fitted));
}
