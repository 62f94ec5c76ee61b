//! Retained-mode surface
//!
//! [`Scene`] is the drawable state of one surface: series, scale bands and
//! the visible time range. [`SceneSurface`] implements [`ChartSurface`] on
//! top of it and [`ChartContainer`] is the host that hands scenes out, one
//! at a time, and reports its width to resize listeners. The GPUI view
//! paints whatever scene the container currently holds.

use crate::data_types::{AxisRange, Marker, ScaleId, ScaleMargins, SeriesStyle};
use crate::errors::{ChartError, ChartResult};
use crate::surface::{
    ChartSurface, HostContainer, ResizeRegistration, SeriesData, SeriesId, SeriesSpec,
    SurfaceOptions, WidthListener,
};
use crate::view_controller::ViewController;
use gpui::Hsla;
use parking_lot::RwLock;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct SceneSeries {
    pub id: SeriesId,
    pub spec: SeriesSpec,
    pub data: SeriesData,
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Hsla,
    /// `None` until content has been fitted once.
    pub time_range: Option<AxisRange>,
    series: Vec<SceneSeries>,
    scales: BTreeMap<ScaleId, ScaleMargins>,
    fit_padding_bars: f64,
    next_id: u64,
    removed: bool,
}

impl Scene {
    pub fn new(options: &SurfaceOptions) -> Self {
        Self {
            width: options.width,
            height: options.height as f32,
            background: options.background,
            time_range: None,
            series: Vec::new(),
            scales: BTreeMap::new(),
            fit_padding_bars: options.fit_padding_bars,
            next_id: 1,
            removed: false,
        }
    }

    /// Series in creation (and paint) order.
    pub fn series(&self) -> &[SceneSeries] {
        &self.series
    }

    pub fn series_by_id(&self, id: SeriesId) -> Option<&SceneSeries> {
        self.series.iter().find(|s| s.id == id)
    }

    fn series_mut(&mut self, id: SeriesId) -> ChartResult<&mut SceneSeries> {
        self.series
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ChartError::UnknownSeries(id.0))
    }

    pub fn margins_for(&self, scale: &ScaleId) -> ScaleMargins {
        self.scales.get(scale).copied().unwrap_or_default()
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Earliest and latest time over every series.
    pub fn full_time_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .filter_map(|s| s.data.time_bounds())
            .map(|(a, b)| (a.as_f64(), b.as_f64()))
            .reduce(|(a0, b0), (a1, b1)| (a0.min(a1), b0.max(b1)))
    }

    /// Time between bars, taken from the first series with two points.
    pub fn bar_spacing(&self) -> Option<f64> {
        self.series.iter().find_map(|s| s.data.min_spacing())
    }

    /// Finite value range of every series on `scale` within `range`.
    /// Histograms always include their base.
    pub fn visible_value_range(&self, scale: &ScaleId, range: &AxisRange) -> Option<(f64, f64)> {
        self.series
            .iter()
            .filter(|s| &s.spec.scale == scale)
            .filter_map(|s| {
                let (lo, hi) = s.data.value_range_in(range)?;
                match &s.spec.style {
                    SeriesStyle::Histogram(h) => Some((lo.min(h.base), hi.max(h.base))),
                    _ => Some((lo, hi)),
                }
            })
            .reduce(|(a0, b0), (a1, b1)| (a0.min(a1), b0.max(b1)))
    }

    /// Scale ids in order of first use.
    pub fn scale_ids(&self) -> Vec<ScaleId> {
        let mut ids: Vec<ScaleId> = Vec::new();
        for s in &self.series {
            if !ids.contains(&s.spec.scale) {
                ids.push(s.spec.scale.clone());
            }
        }
        ids
    }

    pub fn fit_content(&mut self) {
        let Some((min, max)) = self.full_time_range() else {
            self.time_range = None;
            return;
        };
        let pad = self.bar_spacing().unwrap_or(1.0) * self.fit_padding_bars;
        self.time_range = Some(AxisRange::new(min - pad, max + pad));
    }

    /// Scrolls the visible range by a horizontal pixel delta.
    pub fn pan_pixels(&mut self, delta_pixels: f32) {
        let width = self.width;
        if let Some(range) = self.time_range.as_mut() {
            ViewController::pan_axis(range, delta_pixels, width, false);
        }
    }

    /// Zooms the visible range around a pivot given as a fraction of the width.
    pub fn zoom_at(&mut self, pivot_pct: f64, factor: f64) {
        if let Some(range) = self.time_range.as_mut() {
            ViewController::zoom_axis_at(range, pivot_pct.clamp(0.0, 1.0), factor);
        }
    }

    fn clear(&mut self) {
        self.series.clear();
        self.scales.clear();
        self.time_range = None;
        self.removed = true;
    }
}

pub type SharedScene = Arc<RwLock<Scene>>;

/// [`ChartSurface`] writing into a shared [`Scene`].
pub struct SceneSurface {
    scene: SharedScene,
    host: Weak<ContainerInner>,
}

impl SceneSurface {
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }
}

impl ChartSurface for SceneSurface {
    fn add_series(&mut self, spec: SeriesSpec) -> ChartResult<SeriesId> {
        let mut scene = self.scene.write();
        if scene.removed {
            return Err(ChartError::SurfaceUnavailable("surface was removed".into()));
        }
        let id = SeriesId(scene.next_id);
        scene.next_id += 1;
        scene.series.push(SceneSeries {
            id,
            spec,
            data: SeriesData::Values(vec![]),
            markers: vec![],
        });
        Ok(id)
    }

    fn set_data(&mut self, id: SeriesId, data: SeriesData) -> ChartResult<()> {
        self.scene.write().series_mut(id)?.data = data;
        Ok(())
    }

    fn remove_series(&mut self, id: SeriesId) -> ChartResult<()> {
        let mut scene = self.scene.write();
        let before = scene.series.len();
        scene.series.retain(|s| s.id != id);
        if scene.series.len() == before {
            return Err(ChartError::UnknownSeries(id.0));
        }
        Ok(())
    }

    fn configure_scale(&mut self, scale: &ScaleId, margins: ScaleMargins) {
        self.scene.write().scales.insert(scale.clone(), margins);
    }

    fn set_markers(&mut self, id: SeriesId, markers: Vec<Marker>) -> ChartResult<()> {
        self.scene.write().series_mut(id)?.markers = markers;
        Ok(())
    }

    fn fit_content(&mut self) {
        self.scene.write().fit_content();
    }

    fn apply_width(&mut self, width: f32) {
        self.scene.write().width = width;
    }

    fn remove(&mut self) {
        {
            let mut scene = self.scene.write();
            if scene.removed {
                return;
            }
            scene.clear();
        }
        if let Some(host) = self.host.upgrade() {
            let mut slot = host.scene.borrow_mut();
            if slot.as_ref().is_some_and(|s| Arc::ptr_eq(s, &self.scene)) {
                *slot = None;
            }
        }
        debug!("scene surface removed");
    }
}

struct ContainerInner {
    width: Cell<f32>,
    attached: Cell<bool>,
    scene: RefCell<Option<SharedScene>>,
    listeners: RefCell<BTreeMap<u64, WidthListener>>,
    next_listener: Cell<u64>,
}

/// Host for scene surfaces. Cloning yields another handle to the same host.
#[derive(Clone)]
pub struct ChartContainer {
    inner: Rc<ContainerInner>,
}

impl ChartContainer {
    pub fn new(width: f32) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                width: Cell::new(width),
                attached: Cell::new(true),
                scene: RefCell::new(None),
                listeners: RefCell::new(BTreeMap::new()),
                next_listener: Cell::new(1),
            }),
        }
    }

    /// Scene of the live surface, if any.
    pub fn scene(&self) -> Option<SharedScene> {
        self.inner.scene.borrow().clone()
    }

    pub fn width(&self) -> f32 {
        self.inner.width.get()
    }

    /// Records a new width and notifies listeners when it actually changed.
    /// Listeners must not call back into the container.
    pub fn set_width(&self, width: f32) {
        if (width - self.inner.width.get()).abs() < 0.5 {
            return;
        }
        self.inner.width.set(width);
        for listener in self.inner.listeners.borrow_mut().values_mut() {
            listener(width);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn set_attached(&self, attached: bool) {
        self.inner.attached.set(attached);
    }
}

impl HostContainer for ChartContainer {
    fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    fn client_width(&self) -> f32 {
        self.inner.width.get()
    }

    fn create_surface(&self, options: SurfaceOptions) -> ChartResult<Box<dyn ChartSurface>> {
        if !self.is_attached() {
            return Err(ChartError::MissingContainer);
        }
        let mut slot = self.inner.scene.borrow_mut();
        if slot.is_some() {
            return Err(ChartError::ContainerBusy);
        }
        let scene = Arc::new(RwLock::new(Scene::new(&options)));
        *slot = Some(scene.clone());
        Ok(Box::new(SceneSurface {
            scene,
            host: Rc::downgrade(&self.inner),
        }))
    }

    fn observe_resize(&self, listener: WidthListener) -> ChartResult<Box<dyn ResizeRegistration>> {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().insert(id, listener);
        Ok(Box::new(ContainerRegistration {
            host: Rc::downgrade(&self.inner),
            id,
        }))
    }
}

struct ContainerRegistration {
    host: Weak<ContainerInner>,
    id: u64,
}

impl ResizeRegistration for ContainerRegistration {
    fn disconnect(&mut self) {
        if let Some(host) = self.host.upgrade() {
            host.listeners.borrow_mut().remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::{LinePlotConfig, Timestamp};
    use crate::surface::{OhlcPoint, ValuePoint};

    fn options() -> SurfaceOptions {
        SurfaceOptions {
            width: 800.0,
            height: 400,
            background: gpui::black(),
            fit_padding_bars: 0.5,
        }
    }

    fn line_spec(scale: ScaleId) -> SeriesSpec {
        SeriesSpec {
            title: "line".into(),
            scale,
            style: SeriesStyle::Line(LinePlotConfig::default()),
        }
    }

    fn candles(times: &[i64]) -> SeriesData {
        SeriesData::Ohlc(
            times
                .iter()
                .map(|t| OhlcPoint {
                    time: Timestamp(*t),
                    open: 1.0,
                    high: 2.0,
                    low: 0.5,
                    close: 1.5,
                })
                .collect(),
        )
    }

    #[test]
    fn container_hands_out_one_surface_at_a_time() {
        let container = ChartContainer::new(800.0);
        let mut first = container.create_surface(options()).unwrap();
        assert!(container.scene().is_some());
        assert_eq!(
            container.create_surface(options()).err(),
            Some(ChartError::ContainerBusy)
        );

        first.remove();
        assert!(container.scene().is_none());
        first.remove();
        assert!(container.create_surface(options()).is_ok());
    }

    #[test]
    fn fit_content_pads_by_half_a_bar() {
        let container = ChartContainer::new(800.0);
        let mut surface = container.create_surface(options()).unwrap();
        let id = surface.add_series(line_spec(ScaleId::PRICE)).unwrap();
        surface.set_data(id, candles(&[100, 160, 220])).unwrap();
        surface.fit_content();

        let scene = container.scene().unwrap();
        let range = scene.read().time_range.clone().unwrap();
        assert_eq!((range.min, range.max), (70.0, 250.0));
    }

    #[test]
    fn width_changes_keep_the_viewport() {
        let container = ChartContainer::new(800.0);
        let mut surface = container.create_surface(options()).unwrap();
        let id = surface.add_series(line_spec(ScaleId::PRICE)).unwrap();
        surface.set_data(id, candles(&[0, 10, 20, 30])).unwrap();
        surface.fit_content();

        let scene = container.scene().unwrap();
        scene.write().zoom_at(0.5, 0.5);
        let zoomed = scene.read().time_range.clone();

        surface.apply_width(400.0);
        assert_eq!(scene.read().width, 400.0);
        assert_eq!(scene.read().time_range, zoomed);
    }

    #[test]
    fn value_range_per_scale() {
        let container = ChartContainer::new(800.0);
        let mut surface = container.create_surface(options()).unwrap();
        let price = surface.add_series(line_spec(ScaleId::PRICE)).unwrap();
        let rsi = surface.add_series(line_spec(ScaleId::RSI)).unwrap();
        surface.set_data(price, candles(&[1, 2])).unwrap();
        surface
            .set_data(
                rsi,
                SeriesData::Values(vec![
                    ValuePoint::new(Timestamp(1), 30.0),
                    ValuePoint::new(Timestamp(2), 70.0),
                ]),
            )
            .unwrap();

        let scene = container.scene().unwrap();
        let scene = scene.read();
        let all = AxisRange::new(0.0, 10.0);
        assert_eq!(scene.visible_value_range(&ScaleId::PRICE, &all), Some((0.5, 2.0)));
        assert_eq!(scene.visible_value_range(&ScaleId::RSI, &all), Some((30.0, 70.0)));
    }

    #[test]
    fn unknown_series_is_reported() {
        let container = ChartContainer::new(800.0);
        let mut surface = container.create_surface(options()).unwrap();
        assert_eq!(
            surface.remove_series(SeriesId(42)),
            Err(ChartError::UnknownSeries(42))
        );
    }

    #[test]
    fn listeners_only_fire_on_real_changes() {
        let container = ChartContainer::new(800.0);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut registration = container
            .observe_resize(Box::new(move |_| counter.set(counter.get() + 1)))
            .unwrap();

        container.set_width(800.0);
        container.set_width(640.0);
        assert_eq!(hits.get(), 1);

        registration.disconnect();
        container.set_width(500.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(container.listener_count(), 0);
    }
}
