//! Transform helper for coordinate projection

use crate::scales::ChartScale;
use crate::utils::PixelsExt;
use gpui::*;

#[derive(Clone)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub bounds: Bounds<Pixels>,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    pub fn data_to_screen(&self, point: Point<f64>) -> Point<Pixels> {
        Point::new(self.x_data_to_screen(point.x), self.y_data_to_screen(point.y))
    }

    pub fn screen_to_data(&self, point: Point<Pixels>) -> Point<f64> {
        Point::new(
            self.x_scale.invert((point.x - self.bounds.origin.x).as_f32()),
            self.y_scale.invert((point.y - self.bounds.origin.y).as_f32()),
        )
    }

    pub fn x_data_to_screen(&self, x: f64) -> Pixels {
        self.bounds.origin.x + px(self.x_scale.map(x))
    }

    pub fn y_data_to_screen(&self, y: f64) -> Pixels {
        self.bounds.origin.y + px(self.y_scale.map(y))
    }

    /// Width in pixels of `span` data units on the x axis.
    pub fn x_span_to_pixels(&self, span: f64) -> f32 {
        let (x_min, _) = self.x_scale.domain();
        (self.x_scale.map(x_min + span) - self.x_scale.map(x_min)).abs()
    }

    pub fn is_x_visible(&self, x: f64, slack_px: f32) -> bool {
        let sx = self.x_data_to_screen(x).as_f32();
        let left = self.bounds.origin.x.as_f32();
        let right = left + self.bounds.size.width.as_f32();
        sx >= left - slack_px && sx <= right + slack_px
    }
}
