//! gpui_price_chart: OHLCV candles, indicator panes and trade markers for GPUI
//!
//! A [`ChartSession`] turns a [`ChartConfig`] into series on a
//! [`ChartSurface`], tearing everything down before each rebuild.
//! [`PriceChartView`] hosts a session inside a GPUI window.

pub mod catalog;
pub mod chart_view;
pub mod data_types;
pub mod errors;
pub mod markers;
pub mod partition;
pub mod plot_types;
pub mod rendering;
pub mod resize;
pub mod scales;
pub mod scene;
pub mod series_data;
pub mod session;
pub mod surface;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;

pub use chart_view::PriceChartView;
pub use data_types::{
    Bar, ChartConfig, ChartOptions, IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorSet,
    LayoutOptions, Signal, SignalAction, Timestamp,
};
pub use errors::{ChartError, ChartResult};
pub use scene::{ChartContainer, Scene, SceneSurface};
pub use session::{ChartSession, LiveSession, SeriesKey, SessionPhase};
pub use surface::{ChartSurface, HostContainer, ResizeRegistration};
pub use theme::ChartTheme;
