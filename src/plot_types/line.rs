use super::PlotRenderer;
use crate::data_types::LinePlotConfig;
use crate::surface::ValuePoint;
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use gpui::*;

/// Line plot type. Non-finite values split the line into segments.
pub struct LinePlot<'a> {
    pub points: &'a [ValuePoint],
    pub config: &'a LinePlotConfig,
}

impl<'a> LinePlot<'a> {
    pub fn new(points: &'a [ValuePoint], config: &'a LinePlotConfig) -> Self {
        Self { points, config }
    }
}

/// Screen-space runs of consecutive finite points.
pub(crate) fn segments(points: &[ValuePoint], transform: &PlotTransform) -> Vec<Vec<Point<Pixels>>> {
    let mut runs = Vec::new();
    let mut current: Vec<Point<Pixels>> = Vec::new();
    let mut last_px_x = f32::MIN;
    let mut last_px_y = 0.0;

    for point in points {
        if !point.value.is_finite() {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }
        let screen = transform.data_to_screen(Point::new(point.time.as_f64(), point.value));
        let px_x = screen.x.as_f32();
        let px_y = screen.y.as_f32();

        // Same pixel column and barely moved: skip.
        if !current.is_empty() && (px_x - last_px_x).abs() < 0.5 && (px_y - last_px_y).abs() < 1.0 {
            continue;
        }
        current.push(screen);
        last_px_x = px_x;
        last_px_y = px_y;
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

impl PlotRenderer for LinePlot<'_> {
    fn render(&self, window: &mut Window, transform: &PlotTransform, _cx: &mut App) {
        for run in segments(self.points, transform) {
            if run.len() < 2 {
                continue;
            }
            let mut builder = PathBuilder::stroke(px(self.config.line_width));
            builder.move_to(run[0]);
            for p in &run[1..] {
                builder.line_to(*p);
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, self.config.color);
            }
        }
    }
}
