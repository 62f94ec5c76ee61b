use super::PlotRenderer;
use crate::data_types::{Marker, MarkerPosition, MarkerShape, Timestamp};
use crate::surface::OhlcPoint;
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use gpui::*;
use tracing::trace;

const ARROW_SIZE: f32 = 8.0;
const ARROW_OFFSET: f32 = 6.0;

/// Buy/sell arrows anchored to the bars of the primary series.
pub struct MarkerPlot<'a> {
    pub markers: &'a [Marker],
    pub bars: &'a [OhlcPoint],
}

impl<'a> MarkerPlot<'a> {
    pub fn new(markers: &'a [Marker], bars: &'a [OhlcPoint]) -> Self {
        Self { markers, bars }
    }

    fn bar_at(&self, time: Timestamp) -> Option<&OhlcPoint> {
        self.bars
            .binary_search_by(|b| b.time.cmp(&time))
            .ok()
            .map(|i| &self.bars[i])
    }

    /// Tip of the arrow in screen space, or `None` when the marker has no bar.
    fn anchor(&self, marker: &Marker, transform: &PlotTransform) -> Option<(f32, f32)> {
        let bar = self.bar_at(marker.time)?;
        let x = transform.x_data_to_screen(bar.time.as_f64()).as_f32();
        let y = match marker.position {
            MarkerPosition::AboveBar => transform.y_data_to_screen(bar.high).as_f32() - ARROW_OFFSET,
            MarkerPosition::BelowBar => transform.y_data_to_screen(bar.low).as_f32() + ARROW_OFFSET,
        };
        y.is_finite().then_some((x, y))
    }
}

impl PlotRenderer for MarkerPlot<'_> {
    fn render(&self, window: &mut Window, transform: &PlotTransform, cx: &mut App) {
        for marker in self.markers {
            if self.bar_at(marker.time).is_none() {
                trace!(time = %marker.time, "marker has no bar at its time, not drawn");
                continue;
            }
            let Some((x, tip_y)) = self.anchor(marker, transform) else {
                continue;
            };
            if !transform.is_x_visible(marker.time.as_f64(), ARROW_SIZE) {
                continue;
            }
            // Up arrows point at the bar from below, down arrows from above.
            let base_y = match marker.shape {
                MarkerShape::ArrowUp => tip_y + ARROW_SIZE,
                MarkerShape::ArrowDown => tip_y - ARROW_SIZE,
            };
            let half = ARROW_SIZE / 2.0;

            let mut builder = PathBuilder::fill();
            builder.move_to(point(px(x), px(tip_y)));
            builder.line_to(point(px(x + half), px(base_y)));
            builder.line_to(point(px(x - half), px(base_y)));
            builder.line_to(point(px(x), px(tip_y)));
            if let Ok(path) = builder.build() {
                window.paint_path(path, marker.color);
            }

            if marker.text.is_empty() {
                continue;
            }
            let font_size = px(10.0);
            let label_y = match marker.shape {
                MarkerShape::ArrowUp => base_y + 2.0,
                MarkerShape::ArrowDown => base_y - 14.0,
            };
            let run = TextRun {
                len: marker.text.len(),
                font: TextStyle::default().font(),
                color: marker.color,
                background_color: None,
                underline: None,
                strikethrough: None,
            };
            if let Ok(lines) = window.text_system().shape_text(
                marker.text.clone().into(),
                font_size,
                &[run],
                None,
                None,
            ) {
                for line in lines {
                    let _ = line.paint(
                        point(px(x - half), px(label_y)),
                        font_size,
                        TextAlign::Left,
                        None,
                        window,
                        cx,
                    );
                }
            }
        }
    }
}
