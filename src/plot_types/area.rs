// Area plot implementation

use super::line::segments;
use super::PlotRenderer;
use crate::data_types::AreaPlotConfig;
use crate::surface::ValuePoint;
use crate::transform::PlotTransform;
use gpui::*;

/// Area plot type, filled down to the bottom of its pane.
pub struct AreaPlot<'a> {
    pub points: &'a [ValuePoint],
    pub config: &'a AreaPlotConfig,
}

impl<'a> AreaPlot<'a> {
    pub fn new(points: &'a [ValuePoint], config: &'a AreaPlotConfig) -> Self {
        Self { points, config }
    }
}

impl PlotRenderer for AreaPlot<'_> {
    fn render(&self, window: &mut Window, transform: &PlotTransform, _cx: &mut App) {
        let baseline_y = transform.bounds.origin.y + transform.bounds.size.height;

        for run in segments(self.points, transform) {
            if run.len() < 2 {
                continue;
            }
            let first = run[0];
            let last = run[run.len() - 1];

            let mut fill_builder = PathBuilder::fill();
            fill_builder.move_to(Point::new(first.x, baseline_y));
            for p in &run {
                fill_builder.line_to(*p);
            }
            fill_builder.line_to(Point::new(last.x, baseline_y));
            fill_builder.line_to(Point::new(first.x, baseline_y));
            if let Ok(path) = fill_builder.build() {
                window.paint_path(path, self.config.fill_color);
            }

            let mut line_builder = PathBuilder::stroke(px(self.config.line_width));
            line_builder.move_to(first);
            for p in &run[1..] {
                line_builder.line_to(*p);
            }
            if let Ok(path) = line_builder.build() {
                window.paint_path(path, self.config.line_color);
            }
        }
    }
}
