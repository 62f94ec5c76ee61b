use super::PlotRenderer;
use crate::data_types::HistogramConfig;
use crate::surface::ValuePoint;
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use gpui::*;

/// Histogram plot type; each column may carry its own colour.
pub struct HistogramPlot<'a> {
    pub points: &'a [ValuePoint],
    pub config: &'a HistogramConfig,
    pub spacing: f64,
}

impl<'a> HistogramPlot<'a> {
    pub fn new(points: &'a [ValuePoint], config: &'a HistogramConfig, spacing: f64) -> Self {
        Self {
            points,
            config,
            spacing,
        }
    }
}

impl PlotRenderer for HistogramPlot<'_> {
    fn render(&self, window: &mut Window, transform: &PlotTransform, _cx: &mut App) {
        let spacing_px = transform.x_span_to_pixels(self.spacing);
        let gap_px = spacing_px * (1.0 - self.config.bar_width_pct);

        // Gaps thinner than ~1px cause moire; close them.
        let effective_pct = if gap_px < 1.2 {
            1.0
        } else {
            self.config.bar_width_pct as f64
        };
        let base_y = transform.y_data_to_screen(self.config.base);

        for point in self.points {
            if !point.value.is_finite() {
                continue;
            }
            let t = point.time.as_f64();
            // Edge-based snapping so adjacent columns touch without overlap.
            let x_start = t - self.spacing / 2.0;
            let x_end = x_start + self.spacing * effective_pct;
            let px_start = transform.x_data_to_screen(x_start).as_f32().round();
            let px_end = transform.x_data_to_screen(x_end).as_f32().round();
            let rect_w = (px_end - px_start).max(1.0);

            let left = transform.bounds.origin.x.as_f32();
            let right = left + transform.bounds.size.width.as_f32();
            if px_start + rect_w < left || px_start > right {
                continue;
            }

            let top = transform.y_data_to_screen(point.value);
            let rect = Bounds::new(
                Point::new(px(px_start), top.min(base_y)),
                Size::new(px(rect_w), (base_y - top).abs().max(px(1.0))),
            );
            window.paint_quad(fill(rect, point.color.unwrap_or(self.config.color)));
        }
    }
}
