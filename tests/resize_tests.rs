mod common;

use common::{config_with, RecordingContainer};
use gpui_price_chart::resize::ResizeCoordinator;
use gpui_price_chart::surface::{HostContainer, SharedSurface, SurfaceOptions};
use gpui_price_chart::{ChartOptions, ChartSession};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_three_resizes_three_width_updates_no_rebuild() {
    let container = RecordingContainer::new(800.0);
    let mut chart = ChartSession::new(container.clone(), ChartOptions::default());
    chart.configure(config_with(&["ma", "rsi"])).unwrap();

    let (created, added) = {
        let log = container.log();
        (log.surfaces_created, log.series_added)
    };

    container.resize(640.0);
    container.resize(720.0);
    container.resize(1024.0);

    let log = container.log();
    assert_eq!(log.width_updates, vec![640.0, 720.0, 1024.0]);
    assert_eq!(log.surfaces_created, created);
    assert_eq!(log.series_added, added);
    assert_eq!(log.series_removed, 0);
    drop(log);

    assert_eq!(chart.live().map(|l| l.resize().relayed()), Some(3));
}

#[test]
fn test_resize_after_teardown_is_ignored() {
    let container = RecordingContainer::new(800.0);
    let mut chart = ChartSession::new(container.clone(), ChartOptions::default());
    chart.configure(config_with(&["ma"])).unwrap();
    chart.unmount();

    container.resize(300.0);
    assert!(container.log().width_updates.is_empty());
    assert_eq!(container.listener_count(), 0);
}

#[test]
fn test_rebuild_moves_observer_to_new_surface() {
    let container = RecordingContainer::new(800.0);
    let mut chart = ChartSession::new(container.clone(), ChartOptions::default());
    chart.configure(config_with(&["ma"])).unwrap();
    chart.configure(config_with(&["rsi"])).unwrap();

    assert_eq!(container.listener_count(), 1);
    container.resize(500.0);
    assert_eq!(container.log().width_updates, vec![500.0]);

    let log = container.log();
    assert_eq!(log.observers_connected, 2);
    assert_eq!(log.observers_disconnected, 1);
}

#[test]
fn test_coordinator_detach_runs_once() {
    let container = RecordingContainer::new(800.0);
    let surface: SharedSurface = Rc::new(RefCell::new(
        container
            .create_surface(SurfaceOptions {
                width: 800.0,
                height: 300,
                background: gpui::black(),
                fit_padding_bars: 0.5,
            })
            .unwrap(),
    ));

    let mut coordinator = ResizeCoordinator::new();
    coordinator.attach(&container, &surface).unwrap();
    assert!(coordinator.is_attached());

    container.resize(400.0);
    assert!(coordinator.detach());
    assert!(!coordinator.detach());
    container.resize(200.0);

    assert_eq!(coordinator.relayed(), 1);
    assert_eq!(container.log().observers_disconnected, 1);
}

#[test]
fn test_listener_outliving_surface_is_inert() {
    let container = RecordingContainer::new(800.0);
    let surface: SharedSurface = Rc::new(RefCell::new(
        container
            .create_surface(SurfaceOptions {
                width: 800.0,
                height: 300,
                background: gpui::black(),
                fit_padding_bars: 0.5,
            })
            .unwrap(),
    ));
    let mut coordinator = ResizeCoordinator::new();
    coordinator.attach(&container, &surface).unwrap();

    drop(surface);
    container.resize(320.0);
    assert_eq!(coordinator.relayed(), 0);
    assert!(container.log().width_updates.is_empty());
}
