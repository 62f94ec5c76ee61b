// Rendering functions for the chart
#![allow(clippy::collapsible_if)]

use crate::data_types::{AxisRange, ScaleId, ScaleMargins};
use crate::plot_types::{renderer_for, MarkerPlot, PlotRenderer};
use crate::scales::ChartScale;
use crate::scene::Scene;
use crate::surface::SeriesData;
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use crate::utils::{format_price, PixelsExt};
use crate::view_controller::ViewController;
use gpui::*;

const Y_TICKS: usize = 4;
const Y_FIT_MARGIN: f64 = 0.05;

/// One scale band and its fitted vertical scale.
#[derive(Clone)]
pub struct PaneInfo {
    pub scale_id: ScaleId,
    pub bounds: Bounds<Pixels>,
    pub y_scale: ChartScale,
    pub ticks: Vec<f64>,
}

/// Sub-rectangle of `bounds` covered by a scale with `margins`.
pub fn pane_bounds(bounds: Bounds<Pixels>, margins: ScaleMargins) -> Bounds<Pixels> {
    let (top, bottom) = margins.band(bounds.size.height.as_f32());
    Bounds::new(
        Point::new(bounds.origin.x, bounds.origin.y + px(top)),
        Size::new(bounds.size.width, px((bottom - top).max(0.0))),
    )
}

/// Fits every scale of the scene to the values visible in `x_range`.
pub fn layout_panes(scene: &Scene, bounds: Bounds<Pixels>, x_range: &AxisRange) -> Vec<PaneInfo> {
    scene
        .scale_ids()
        .into_iter()
        .map(|scale_id| {
            let pane = pane_bounds(bounds, scene.margins_for(&scale_id));
            let (lo, hi) = scene
                .visible_value_range(&scale_id, x_range)
                .unwrap_or((f64::NAN, f64::NAN));
            let domain = ViewController::compute_auto_fit(lo, hi, Y_FIT_MARGIN);
            let y_scale = ChartScale::new_linear(domain, (pane.size.height.as_f32(), 0.0));
            let ticks = y_scale.ticks(Y_TICKS);
            PaneInfo {
                scale_id,
                bounds: pane,
                y_scale,
                ticks,
            }
        })
        .collect()
}

fn paint_grid(window: &mut Window, panes: &[PaneInfo], color: Hsla) {
    for pane in panes {
        let transform = PlotTransform::new(
            ChartScale::new_linear((0.0, 1.0), (0.0, 1.0)),
            pane.y_scale.clone(),
            pane.bounds,
        );
        for tick in &pane.ticks {
            let y = transform.y_data_to_screen(*tick);
            window.paint_quad(fill(
                Bounds::new(
                    Point::new(pane.bounds.origin.x, y),
                    Size::new(pane.bounds.size.width, px(1.0)),
                ),
                color,
            ));
        }
    }
}

/// Paints background, grid, every series and their markers.
pub fn paint_scene(
    window: &mut Window,
    bounds: Bounds<Pixels>,
    scene: &Scene,
    theme: &ChartTheme,
    cx: &mut App,
) {
    window.paint_quad(fill(bounds, scene.background));

    let Some(x_range) = scene.time_range.clone() else {
        return;
    };
    let width_px = bounds.size.width.as_f32();
    if width_px <= 0.0 {
        return;
    }
    let x_scale = ChartScale::new_linear((x_range.min, x_range.max), (0.0, width_px));
    let panes = layout_panes(scene, bounds, &x_range);
    let spacing = scene.bar_spacing().unwrap_or(1.0);

    window.with_content_mask(Some(ContentMask { bounds }), |window| {
        paint_grid(window, &panes, theme.grid_line);

        for series in scene.series() {
            let Some(pane) = panes.iter().find(|p| p.scale_id == series.spec.scale) else {
                continue;
            };
            let transform = PlotTransform::new(x_scale.clone(), pane.y_scale.clone(), pane.bounds);
            if let Some(renderer) = renderer_for(series, spacing) {
                renderer.render(window, &transform, cx);
            }
            if !series.markers.is_empty() {
                if let SeriesData::Ohlc(bars) = &series.data {
                    MarkerPlot::new(&series.markers, bars).render(window, &transform, cx);
                }
            }
        }
    });
}

/// Right-aligned value labels for every pane, positioned relative to `bounds`.
pub fn paint_value_labels(panes: &[PaneInfo], bounds: Bounds<Pixels>, color: Hsla) -> Vec<AnyElement> {
    let font_size = px(11.0);
    let mut elements = Vec::new();

    for pane in panes {
        let step = match pane.ticks.as_slice() {
            [a, b, ..] => b - a,
            _ => 1.0,
        };
        for tick in &pane.ticks {
            let y = pane.bounds.origin.y - bounds.origin.y + px(pane.y_scale.map(*tick));
            elements.push(
                div()
                    .absolute()
                    .right(px(4.0))
                    .top(y - px(7.0))
                    .h(px(14.0))
                    .text_color(color)
                    .text_size(font_size)
                    .child(format_price(*tick, step))
                    .into_any_element(),
            );
        }
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::{HistogramConfig, SeriesStyle, Timestamp};
    use crate::surface::{ChartSurface, HostContainer, SeriesSpec, SurfaceOptions, ValuePoint};
    use core::prelude::v1::test;
    use crate::scene::ChartContainer;

    #[test]
    fn pane_bounds_follow_margins() {
        let bounds = Bounds::new(point(px(0.0), px(100.0)), size(px(400.0), px(200.0)));
        let pane = pane_bounds(bounds, ScaleMargins::new(0.8, 0.0));
        assert_eq!(pane.origin.y.as_f32(), 260.0);
        assert_eq!(pane.size.height.as_f32(), 40.0);
    }

    #[test]
    fn histogram_panes_include_zero() {
        let container = ChartContainer::new(400.0);
        let mut surface = container
            .create_surface(SurfaceOptions {
                width: 400.0,
                height: 200,
                background: gpui::black(),
                fit_padding_bars: 0.5,
            })
            .unwrap();
        surface.configure_scale(&ScaleId::VOLUME, ScaleMargins::new(0.8, 0.0));
        let id = surface
            .add_series(SeriesSpec {
                title: "Volume".into(),
                scale: ScaleId::VOLUME,
                style: SeriesStyle::Histogram(HistogramConfig::default()),
            })
            .unwrap();
        surface
            .set_data(
                id,
                SeriesData::Values(vec![
                    ValuePoint::new(Timestamp(1), 100.0),
                    ValuePoint::new(Timestamp(2), 300.0),
                ]),
            )
            .unwrap();
        surface.fit_content();

        let scene = container.scene().unwrap();
        let scene = scene.read();
        let bounds = Bounds::new(point(px(0.0), px(0.0)), size(px(400.0), px(200.0)));
        let range = scene.time_range.clone().unwrap();
        let panes = layout_panes(&scene, bounds, &range);

        assert_eq!(panes.len(), 1);
        let (lo, hi) = panes[0].y_scale.domain();
        assert!(lo < 0.0 && hi > 300.0);
        assert_eq!(panes[0].bounds.size.height.as_f32(), 40.0);
    }
}
