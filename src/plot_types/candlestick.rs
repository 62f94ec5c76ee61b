use super::PlotRenderer;
use crate::data_types::CandlestickConfig;
use crate::surface::OhlcPoint;
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use gpui::*;

/// Candlestick plot type
pub struct CandlestickPlot<'a> {
    pub points: &'a [OhlcPoint],
    pub config: &'a CandlestickConfig,
    /// Seconds between bars.
    pub spacing: f64,
}

impl<'a> CandlestickPlot<'a> {
    pub fn new(points: &'a [OhlcPoint], config: &'a CandlestickConfig, spacing: f64) -> Self {
        Self {
            points,
            config,
            spacing,
        }
    }
}

impl PlotRenderer for CandlestickPlot<'_> {
    fn render(&self, window: &mut Window, transform: &PlotTransform, _cx: &mut App) {
        let slot_px = transform.x_span_to_pixels(self.spacing);
        let body_w = (slot_px * self.config.body_width_pct).max(1.0);
        let wick_w = self.config.wick_width_px.min(body_w).max(1.0);

        for candle in self.points {
            let values = [candle.open, candle.high, candle.low, candle.close];
            if values.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let t = candle.time.as_f64();
            if !transform.is_x_visible(t, body_w) {
                continue;
            }

            let is_up = candle.close >= candle.open;
            let center_x = transform.x_data_to_screen(t).as_f32();
            let y_h = transform.y_data_to_screen(candle.high).as_f32();
            let y_l = transform.y_data_to_screen(candle.low).as_f32();
            let y_o = transform.y_data_to_screen(candle.open).as_f32();
            let y_c = transform.y_data_to_screen(candle.close).as_f32();
            let (b_top, b_bot) = if is_up { (y_c, y_o) } else { (y_o, y_c) };

            let (wick_color, body_color) = if is_up {
                (self.config.up_wick_color, self.config.up_body_color)
            } else {
                (self.config.down_wick_color, self.config.down_body_color)
            };

            // Wick
            window.paint_quad(fill(
                Bounds::new(
                    Point::new(px(center_x - wick_w / 2.0), px(y_h)),
                    Size::new(px(wick_w), px((y_l - y_h).max(1.0))),
                ),
                wick_color,
            ));
            // Body
            window.paint_quad(fill(
                Bounds::new(
                    Point::new(px(center_x - body_w / 2.0), px(b_top)),
                    Size::new(px(body_w), px((b_bot - b_top).max(1.0))),
                ),
                body_color,
            ));
        }
    }
}
