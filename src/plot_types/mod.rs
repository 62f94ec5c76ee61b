// Plot types module

pub mod annotation;
pub mod area;
pub mod candlestick;
pub mod histogram;
pub mod line;

pub use annotation::MarkerPlot;
pub use area::AreaPlot;
pub use candlestick::CandlestickPlot;
pub use histogram::HistogramPlot;
pub use line::LinePlot;

use crate::data_types::SeriesStyle;
use crate::scene::SceneSeries;
use crate::transform::PlotTransform;
use crate::surface::SeriesData;
use gpui::*;

/// Trait for rendering plot types
pub trait PlotRenderer {
    fn render(&self, window: &mut Window, transform: &PlotTransform, cx: &mut App);
}

/// Picks the renderer matching a series' style. A style whose shape does not
/// fit the data (candles over single values) draws nothing.
pub fn renderer_for<'a>(series: &'a SceneSeries, spacing: f64) -> Option<Box<dyn PlotRenderer + 'a>> {
    match (&series.spec.style, &series.data) {
        (SeriesStyle::Candlestick(config), SeriesData::Ohlc(points)) => {
            Some(Box::new(CandlestickPlot::new(points, config, spacing)))
        }
        (SeriesStyle::Line(config), SeriesData::Values(points)) => {
            Some(Box::new(LinePlot::new(points, config)))
        }
        (SeriesStyle::Histogram(config), SeriesData::Values(points)) => {
            Some(Box::new(HistogramPlot::new(points, config, spacing)))
        }
        (SeriesStyle::Area(config), SeriesData::Values(points)) => {
            Some(Box::new(AreaPlot::new(points, config)))
        }
        _ => None,
    }
}
