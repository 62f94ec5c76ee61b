//! Boundary between a chart session and the environment that draws it.
//!
//! A [`HostContainer`] is the place a chart lives in: it reports its width,
//! allocates rendering surfaces and lets a session observe width changes.
//! A [`ChartSurface`] is one allocated drawing surface with its series.

use crate::data_types::{AxisRange, Marker, ScaleId, ScaleMargins, SeriesStyle, Timestamp};
use crate::errors::ChartResult;
use gpui::Hsla;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesId(pub u64);

/// Everything needed to create one drawable series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSpec {
    pub title: String,
    pub scale: ScaleId,
    pub style: SeriesStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OhlcPoint {
    pub time: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single-valued point; `color` overrides the series colour for this point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValuePoint {
    pub time: Timestamp,
    pub value: f64,
    pub color: Option<Hsla>,
}

impl ValuePoint {
    pub fn new(time: Timestamp, value: f64) -> Self {
        Self {
            time,
            value,
            color: None,
        }
    }

    pub fn colored(time: Timestamp, value: f64, color: Hsla) -> Self {
        Self {
            time,
            value,
            color: Some(color),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SeriesData {
    Ohlc(Vec<OhlcPoint>),
    Values(Vec<ValuePoint>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            Self::Ohlc(p) => p.len(),
            Self::Values(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn time_at(&self, idx: usize) -> Option<Timestamp> {
        match self {
            Self::Ohlc(p) => p.get(idx).map(|p| p.time),
            Self::Values(p) => p.get(idx).map(|p| p.time),
        }
    }

    /// First and last time; points are kept time-ascending.
    pub fn time_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        let first = self.time_at(0)?;
        let last = self.time_at(self.len() - 1)?;
        Some((first, last))
    }

    /// Smallest gap between consecutive points, in seconds.
    pub fn min_spacing(&self) -> Option<f64> {
        (1..self.len())
            .filter_map(|i| Some((self.time_at(i)?.0 - self.time_at(i - 1)?.0) as f64))
            .filter(|d| *d > 0.0)
            .reduce(f64::min)
    }

    /// Finite value range of points inside `range`; `NaN` points are gaps.
    pub fn value_range_in(&self, range: &AxisRange) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut include = |v: f64| {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        };
        match self {
            Self::Ohlc(points) => {
                for p in points.iter().filter(|p| range.contains(p.time.as_f64())) {
                    include(p.low);
                    include(p.high);
                }
            }
            Self::Values(points) => {
                for p in points.iter().filter(|p| range.contains(p.time.as_f64())) {
                    include(p.value);
                }
            }
        }
        (lo <= hi).then_some((lo, hi))
    }
}

/// Options a container needs to allocate a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceOptions {
    pub width: f32,
    pub height: u32,
    pub background: Hsla,
    /// Bars of padding added on each side when fitting content.
    pub fit_padding_bars: f64,
}

/// One allocated rendering surface and the series drawn on it.
pub trait ChartSurface {
    fn add_series(&mut self, spec: SeriesSpec) -> ChartResult<SeriesId>;

    /// Replaces all data of a series.
    fn set_data(&mut self, id: SeriesId, data: SeriesData) -> ChartResult<()>;

    fn remove_series(&mut self, id: SeriesId) -> ChartResult<()>;

    fn configure_scale(&mut self, scale: &ScaleId, margins: ScaleMargins);

    /// Replaces the markers of a series in one batch; an empty list clears them.
    fn set_markers(&mut self, id: SeriesId, markers: Vec<Marker>) -> ChartResult<()>;

    /// Fits the visible time range to all data.
    fn fit_content(&mut self);

    /// Resizes horizontally; series data and the visible range are untouched.
    fn apply_width(&mut self, width: f32);

    /// Releases the surface. Further calls must be no-ops.
    fn remove(&mut self);
}

/// A surface shared between its session and the session's resize listener.
pub type SharedSurface = Rc<RefCell<Box<dyn ChartSurface>>>;

/// Called with the new container width.
pub type WidthListener = Box<dyn FnMut(f32)>;

/// Live width observation; disconnecting stops all further callbacks.
pub trait ResizeRegistration {
    fn disconnect(&mut self);
}

pub trait HostContainer {
    fn is_attached(&self) -> bool {
        true
    }

    fn client_width(&self) -> f32;

    fn create_surface(&self, options: SurfaceOptions) -> ChartResult<Box<dyn ChartSurface>>;

    fn observe_resize(&self, listener: WidthListener) -> ChartResult<Box<dyn ResizeRegistration>>;
}
