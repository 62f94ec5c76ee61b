pub mod annotations;
pub mod axis;
pub mod bar;
pub mod config;
pub mod indicators;
pub mod options;
pub mod plot_configs;
pub mod signals;

pub use annotations::*;
pub use axis::*;
pub use bar::{Bar, Timestamp};
pub use config::ChartConfig;
pub use indicators::*;
pub use options::*;
pub use plot_configs::{
    AreaPlotConfig, CandlestickConfig, HistogramConfig, LinePlotConfig, RenderKind, SeriesStyle,
    StyleOverride,
};
pub use signals::*;
